use std::fs;

use bbfacts_ingest::read_csv_table;

#[test]
fn reads_table_from_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("plans.csv");
    fs::write(
        &path,
        "company_name,data_service_price,dl_speed_in_kbps\nAcme,$49.99,100000\n\"Big, Co\",10,1500\n",
    )
    .expect("write csv");

    let table = read_csv_table(&path).expect("read csv");
    assert_eq!(
        table.headers,
        vec!["company_name", "data_service_price", "dl_speed_in_kbps"]
    );
    assert_eq!(table.rows.len(), 2);
    assert_eq!(table.rows[1].cells[0], "Big, Co");

    let rows: Vec<_> = table.raw_rows().collect();
    assert_eq!(rows[0].get("data_service_price"), Some("$49.99"));
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.csv");
    let error = read_csv_table(&path).expect_err("missing file");
    assert!(format!("{error:#}").contains("absent.csv"));
}
