use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::{ExcelDateTime, Format, Workbook, Worksheet};

enum Value<'a> {
    Text(&'a str),
    Num(f64),
    Date(u16, u8, u8),
}

use Value::{Date, Num, Text};

fn write_row(sheet: &mut Worksheet, row: u32, cells: &[(u16, Value)]) {
    for (col, value) in cells {
        match value {
            Text(s) => sheet.write_string(row, *col, *s).unwrap(),
            Num(n) => sheet.write_number(row, *col, *n).unwrap(),
            Date(y, m, d) => {
                let date = ExcelDateTime::from_ymd(*y, *m, *d).unwrap();
                let format = Format::new().set_num_format("yyyy-mm-dd");
                sheet.write_datetime_with_format(row, *col, &date, &format).unwrap()
            }
        };
    }
}

/// Lead row in the Eskişehir layout: name=1 phone=4 country=8 visa=9 status=12.
fn eskisehir_lead(sheet: &mut Worksheet, row: u32, name: &str, country: &str, status: &str) {
    write_row(sheet, row, &[
        (1, Text(name)),
        (4, Num(5321234567.0)),
        (5, Text("ayse@example.com")),
        (6, Text("p:instagram")),
        (8, Text(country)),
        (12, Text(status)),
        (13, Text("40%")),
        (14, Text("ilk\ngörüşme")),
    ]);
}

fn build_workbook(dir: &Path, with_istanbul: bool) -> PathBuf {
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name("Eray ESKİŞEHİR Lead").unwrap();
    write_row(sheet, 0, &[(0, Text("Eray - Lead Takip"))]);
    write_row(sheet, 4, &[(1, Text("Ad Soyad")), (4, Text("Telefon"))]);
    eskisehir_lead(sheet, 5, "  Ayşe Yılmaz ", "İspanya", "Evrak Toplanıyor");
    eskisehir_lead(sheet, 6, "Mehmet Kaya", "İngiltere", "Olumsuz");
    write_row(sheet, 7, &[(4, Text("05550000000"))]);
    write_row(sheet, 8, &[(1, Text("Ad Soyad"))]);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Dilara ESKİŞEHİR Lead").unwrap();
    write_row(sheet, 5, &[(1, Text("Zeynep Ak"))]);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Eray GAZİANTEPLead ").unwrap();
    write_row(sheet, 5, &[
        (1, Text("Can Demir")),
        (10, Text("Schengen")),
        (13, Text("Vize onaylandı")),
    ]);

    if with_istanbul {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Elanur İSTANBULLead").unwrap();
        write_row(sheet, 5, &[(1, Text("Elif Şahin")), (7, Text("USA"))]);
    }

    let sheet = workbook.add_worksheet();
    sheet.set_name("Notlar").unwrap();
    write_row(sheet, 0, &[(0, Text("Gelir hedefleri burada değil"))]);

    let sheet = workbook.add_worksheet();
    sheet.set_name("Gelir Tablosu").unwrap();
    write_row(sheet, 2, &[(0, Text("No")), (1, Text("Müşteri"))]);
    write_row(sheet, 3, &[
        (0, Num(1.0)),
        (1, Text("Ayşe Yılmaz")),
        (2, Text("Eray")),
        (3, Text("Eskişehir")),
        (4, Text("Havale")),
        (5, Date(2025, 1, 15)),
        (6, Num(1500.0)),
        (7, Text("2025-02-15")),
        (8, Num(1500.0)),
        (9, Num(3000.0)),
    ]);
    write_row(sheet, 4, &[(1, Text("Mehmet Kaya")), (6, Text("-")), (9, Num(2000.0))]);
    write_row(sheet, 5, &[(1, Text("Can Demir")), (6, Text("-")), (9, Text("yok"))]);

    let path = dir.join("leads.xlsx");
    workbook.save(&path).unwrap();
    path
}

fn leadsheet(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("leadsheet").unwrap();
    cmd.arg("--config").arg(dir.join("settings.json"));
    cmd
}

#[test]
fn test_generate_writes_module() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), true);
    let output = dir.path().join("src").join("data").join("importedData.ts");

    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--output")
        .arg(&output)
        .args(["--date", "2026-02-25"])
        .assert()
        .success()
        .stdout("OK: eskisehir=3, gaziantep=1, istanbul=1, revenue=3\n");

    let module = std::fs::read_to_string(&output).unwrap();
    assert!(module.starts_with("// AUTO-GENERATED from Excel"));
    assert!(module.contains(
        "{ id: \"1001\", ad: \"Ayşe Yılmaz\", telefon: \"5321234567\", email: \"ayse@example.com\", \
         vize: \"İspanya\", ulke: \"İspanya\", durum: \"Beklemede\" as StatusType, \
         durum_raw: \"Evrak Toplanıyor\""
    ));
    assert!(module.contains("kaynak: \"instagram\", not: \"ilk görüşme\", danisman: \"Eray\""));
    assert!(module.contains("id: \"1002\", ad: \"Mehmet Kaya\""));
    assert!(module.contains("vize: \"İngiltere\", ulke: \"İngiltere\", durum: \"Olumsuz\""));
    assert!(module.contains("id: \"1003\", ad: \"Zeynep Ak\""));
    assert!(module.contains("vize: \"Diğer\""));
    assert!(module.contains("id: \"1004\", ad: \"Can Demir\""));
    assert!(module.contains("vize: \"Schengen\""));
    assert!(module.contains("durum: \"Tamamlandı\" as StatusType"));
    assert!(module.contains("sehir: \"Gaziantep\""));
    assert!(module.contains("id: \"1005\", ad: \"Elif Şahin\""));
    assert!(module.contains("vize: \"Amerika\""));
    assert!(!module.contains("id: \"1006\""));
    assert!(module.contains("createdAt: \"2026-02-25\", updatedAt: \"2026-02-25\""));
    assert!(module.contains(
        "export const allImportedCustomers: Customer[] = [...eskisehirData, ...gaziantepData, ...istanbulData];"
    ));
    assert!(module.contains("{ id: \"1\", ad: \"Ayşe Yılmaz\""));
    assert!(module.contains("odemeYontemi: \"Havale\", onOdemeTarihi: \"2025-01-15\", onOdeme: 1500,"));
    assert!(module.contains("onOdeme: 1500, kalanTarih: \"2025-02-15\", kalanOdeme: 1500, toplam: 3000 },"));
    assert!(module.contains("{ id: \"2\", ad: \"Mehmet Kaya\""));
    assert!(module.contains("{ id: \"3\", ad: \"Can Demir\""));
    assert!(module.contains("onOdeme: 0, kalanTarih: \"\", kalanOdeme: 0, toplam: 0 },"));
}

#[test]
fn test_generate_overwrites_previous_output() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), true);
    let output = dir.path().join("importedData.ts");
    std::fs::write(&output, "export const stale = 1;\n").unwrap();

    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    let module = std::fs::read_to_string(&output).unwrap();
    assert!(!module.contains("stale"));
}

#[test]
fn test_missing_sheet_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), false);
    let output = dir.path().join("importedData.ts");

    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Sheet not found: 'Elanur İSTANBULLead'"));

    assert!(!output.exists());
}

#[test]
fn test_missing_workbook_fails() {
    let dir = tempfile::tempdir().unwrap();
    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(dir.path().join("absent.xlsx"))
        .arg("--output")
        .arg(dir.path().join("out.ts"))
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_invalid_date_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), true);
    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--output")
        .arg(dir.path().join("out.ts"))
        .args(["--date", "25/02/2026"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date"));
}

#[test]
fn test_custom_settings_layout() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), false);
    let settings = r#"{
        "id_base": 500,
        "groups": [{
            "name": "gaziantep",
            "export": "gaziantepData",
            "sheets": [{
                "sheet": "Eray GAZİANTEPLead ",
                "consultant": "Eray",
                "city": "Gaziantep",
                "columns": {"name": 1, "phone": null, "email": null, "source": null,
                    "country": null, "visa": 10, "sub_status": null, "status": 13,
                    "documents": null, "note": null}
            }]
        }]
    }"#;
    std::fs::write(dir.path().join("settings.json"), settings).unwrap();
    let output = dir.path().join("out.ts");

    leadsheet(dir.path())
        .arg("generate")
        .arg("--workbook")
        .arg(&workbook)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout("OK: gaziantep=1, revenue=3\n");

    let module = std::fs::read_to_string(&output).unwrap();
    assert!(module.contains("{ id: \"501\", ad: \"Can Demir\""));
    assert!(module.contains("export const allImportedCustomers: Customer[] = [...gaziantepData];"));
}

#[test]
fn test_sheets_lists_roles() {
    let dir = tempfile::tempdir().unwrap();
    let workbook = build_workbook(dir.path(), false);
    leadsheet(dir.path())
        .arg("sheets")
        .arg("--workbook")
        .arg(&workbook)
        .assert()
        .success()
        .stdout(predicate::str::contains("Gelir Tablosu"))
        .stdout(predicate::str::contains("revenueData"))
        .stdout(predicate::str::contains("gaziantepData (Eray, Gaziantep)"))
        .stdout(predicate::str::contains("\"Elanur İSTANBULLead\" is not in the workbook"));
}

#[test]
fn test_classify_command() {
    let dir = tempfile::tempdir().unwrap();
    leadsheet(dir.path())
        .args(["classify", "--status", "Evrak Toplanıyor", "--country", "İNGİLTERE"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beklemede"))
        .stdout(predicate::str::contains("İngiltere"));

    leadsheet(dir.path())
        .arg("classify")
        .assert()
        .success()
        .stdout(predicate::str::contains("Diğer"));
}

#[test]
fn test_init_writes_defaults_once() {
    let dir = tempfile::tempdir().unwrap();
    leadsheet(dir.path()).arg("init").assert().success();

    let written = std::fs::read_to_string(dir.path().join("settings.json")).unwrap();
    assert!(written.contains("\"Eray GAZİANTEPLead \""));
    assert!(written.contains("\"sheet_contains\": \"Gelir\""));

    leadsheet(dir.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    leadsheet(dir.path()).args(["init", "--force"]).assert().success();
}
