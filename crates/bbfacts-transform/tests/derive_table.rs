use bbfacts_ingest::read_csv_table_from_reader;
use bbfacts_model::{AdditionalCharge, ErrorKind, LabelOptions, ServiceType};
use bbfacts_transform::derive_records;

const CSV: &str = "\
company_name,data_service_name,data_service_price,billing_frequency_in_months,dl_speed_in_kbps,ul_speed_in_kbps,fixed_or_mobile,one_time_fee_name_0,one_time_fee_price_0,one_time_fee_name_1,one_time_fee_price_1
Acme,Basic,$49.99,12,100000,20000,,zeta fee,$1,Alpha fee,$2
Acme,Mobile Max,$100,1,50.5,10.0,mobile,,,,
";

#[test]
fn derives_every_row_in_order() {
    let table = read_csv_table_from_reader(CSV.as_bytes()).unwrap();
    let records = derive_records(&table, &LabelOptions::default()).unwrap();

    assert_eq!(records.len(), 2);
    let basic = &records[0];
    assert_eq!(basic.row, 2);
    assert_eq!(basic.monthly_price, "599.88");
    assert_eq!(basic.service_type, ServiceType::Fixed);
    assert_eq!(
        basic.one_time_charges,
        vec![
            AdditionalCharge {
                name: "Alpha fee".to_string(),
                value: "2".to_string(),
            },
            AdditionalCharge {
                name: "zeta fee".to_string(),
                value: "1".to_string(),
            },
        ]
    );

    let mobile = &records[1];
    assert_eq!(mobile.row, 3);
    assert_eq!(mobile.monthly_price, "100.00");
    assert_eq!(mobile.service_type, ServiceType::Mobile);
    assert_eq!(mobile.download_speed.to_string(), "50.5");
    assert_eq!(mobile.upload_speed.to_string(), "10");
    assert!(mobile.one_time_charges.is_empty());
}

#[test]
fn first_failing_row_stops_derivation() {
    let csv = "\
data_service_price,billing_frequency_in_months,dl_speed_in_kbps,ul_speed_in_kbps
$10,1,1000,1000
$10,monthly,1000,1000
$10,x,1000,1000
";
    let table = read_csv_table_from_reader(csv.as_bytes()).unwrap();
    let error = derive_records(&table, &LabelOptions::default()).unwrap_err();
    assert_eq!(error.row, 3);
    assert_eq!(error.kind(), ErrorKind::Format);
}

#[test]
fn charge_name_limit_is_configurable() {
    let csv = "\
data_service_price,billing_frequency_in_months,dl_speed_in_kbps,ul_speed_in_kbps,monthly_fee_name_1,monthly_fee_price_1
$10,1,1000,1000,Equipment rental,$5
";
    let table = read_csv_table_from_reader(csv.as_bytes()).unwrap();
    let options = LabelOptions::new().with_charge_name_limit(10);
    let records = derive_records(&table, &options).unwrap();
    assert_eq!(records[0].monthly_charges[0].name, "Equipme...");
}
