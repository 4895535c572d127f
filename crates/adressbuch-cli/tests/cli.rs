//! End-to-end tests for the adressbuch binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn write_reference(dir: &Path) {
    let w = |name: &str, content: &str| fs::write(dir.join(name), content).unwrap();
    w("pages.csv", "PageID,Date,PageLabel\n29210592,1864-08-15,62\n");
    w("family_names.txt", "Adam\nMeier\n");
    w("given_names.csv", "Name,Gender\nAnna,F\nJohann,M\n");
    w(
        "nobility_names.csv",
        "Adelsname (Rohtext),Adelsname (bereinigt)\nvon Mülinen,von Mülinen\n",
    );
    w("titles.csv", "Title,Normalized,Gender\nWittwe,Witwe,F\n");
    w(
        "occupations.csv",
        "Occupation,CH-ISCO-19\nSchneiderin,753105\nSchreiner,711503\n",
    );
    w("economic_activities.csv", "Branche,NOGA-Code\nParfümerie,477502\n");
    w(
        "HCL_CH_ISCO_19_PROF_1_2_1_level_6.csv",
        "Code,Name_de\n753105,Schneider | Schneiderin\n711503,Schreiner | Schreinerin\n",
    );
    w("HCL_NOGA_level_5.csv", "Code,Name_de\n477502,Parfümerien\n");
    w("pois.csv", "PointOfInterest,Normalized\nBollwerk,Bollwerk\n");
    w(
        "street_abbrevs.csv",
        "Abbreviation,Street\nMetzg.,Metzgergasse\nAarberg.,Aarbergergasse\n",
    );
    w("streets.csv", "Street\nMetzgergasse\nAarbergergasse\n");
    w(
        "address_reform_1882.csv",
        "Adresse (vor 1882),Adresse (nach 1882)\nMetzgergasse 21,Metzgergasse 40\nAarbergergasse 63,Aarbergergasse 10\n",
    );
}

#[test]
fn split_writes_review_sheet() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference");
    fs::create_dir(&reference).unwrap();
    write_reference(&reference);
    let input = dir.path().join("lines.csv");
    fs::write(
        &input,
        "PageID,Column,X,Y,Width,Height,Text\n\
         29210592,1,287,1545,601,49,\"Adam, Wittwe, Schneiderin,\"\n\
         29210592,1,367,1601,500,49,Aarberg. 63\n",
    )
    .unwrap();

    Command::cargo_bin("adressbuch")
        .unwrap()
        .args(["--reference", reference.to_str().unwrap(), "split"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Adam"))
        .stdout(predicate::str::contains("Wittwe"))
        .stdout(predicate::str::contains("Aarberg. 63"));
}

#[test]
fn split_fails_on_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference");
    fs::create_dir(&reference).unwrap();
    write_reference(&reference);

    Command::cargo_bin("adressbuch")
        .unwrap()
        .args(["--reference", reference.to_str().unwrap(), "split", "missing.csv"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn release_builds_person_and_company_files() {
    let dir = tempfile::tempdir().unwrap();
    let reference = dir.path().join("reference");
    fs::create_dir(&reference).unwrap();
    write_reference(&reference);
    let reviewed = dir.path().join("reviewed");
    fs::create_dir(&reviewed).unwrap();
    fs::write(
        reviewed.join("29210592.csv"),
        "ID,Scan,Position,Name,Vorname,Ledigname,Adelsname,Titel,Beruf,Beruf 2,Beruf 3,\
         Adresse,Adresse 2,Adresse 3,Arbeitsort,Bemerkungen,nicht zuweisbar\n\
         BAE-1,29210592,\"287,1545,601,49\",Adam,Anna,,,Wittwe,Schneiderin,,,Aarberg. 63,,,,,\n\
         BAE-2,29210592,\"287,1650,601,49\",Buß & Cie.,,,,[Firma],Parfümerie,,,Metzg. 21,,,,,\n",
    )
    .unwrap();
    let output = dir.path().join("release");

    Command::cargo_bin("adressbuch")
        .unwrap()
        .args(["--reference", reference.to_str().unwrap(), "release"])
        .arg(&reviewed)
        .args(["--output", output.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 persons and 1 companies"));

    let persons = fs::read_to_string(output.join("Personen.csv")).unwrap();
    assert!(persons.contains("Aarbergergasse 10"));
    assert!(persons.contains("Schneiderin"));
    let companies = fs::read_to_string(output.join("Firmen.csv")).unwrap();
    assert!(companies.contains("Buß & Compagnie"));
    assert!(companies.contains("477502"));
    assert!(output.join("Unklare Adressen vor 1882.csv").exists());
}
