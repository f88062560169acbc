use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use payroll_desk::config::Config;
use payroll_desk::routes;

fn test_config() -> Config {
    Config::from_lookup(|key| match key {
        "RATE_IMPORT_PER_MIN" => Some("2".to_string()),
        "IMPORT_MAX_BYTES" => Some("512".to_string()),
        _ => None,
    })
    .expect("defaults parse")
}

macro_rules! app {
    () => {{
        let config = test_config();
        test::init_service(App::new().configure(move |cfg| routes::configure(cfg, config))).await
    }};
}

fn post(uri: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

fn get(uri: &str) -> test::TestRequest {
    test::TestRequest::get()
        .uri(uri)
        .peer_addr("127.0.0.1:40000".parse().unwrap())
}

#[actix_web::test]
async fn index_answers() {
    let app = app!();
    let resp = test::call_service(&app, get("/").to_request()).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn calculate_fills_derived_fields() {
    let app = app!();
    let req = post("/api/v1/payroll/calculate")
        .set_json(json!({
            "id": 1,
            "employeeName": "John Doe",
            "paymentDate": "2024-01-15",
            "basicSalary": "75000",
            "incentive": 5000,
            "specialBonus": 2000,
            "numberOfBonuses": 2,
            "numberOfBusinessTrips": 1,
            "otHours": 10,
            "socialInsurance": 1500,
            "advances": 1000,
            "transportationDeductions": 500,
            "numberOfDeductions": 1,
            "netPay": 1,
            "status": "Loaded"
        }))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["bonusRate"], json!(2884.62));
    assert_eq!(body["grossPay"], json!(94259.62));
    assert_eq!(body["totalDeductions"], json!(5884.62));
    assert_eq!(body["netPay"], json!(88375.0));
    assert_eq!(body["status"], json!("Loaded"));
}

#[actix_web::test]
async fn submit_reports_rows_and_summary() {
    let app = app!();
    let req = post("/api/v1/payroll/submit")
        .set_json(json!([
            { "id": 1, "employeeName": "John Doe", "paymentDate": "2024-01-15", "basicSalary": 75000, "status": "Loaded" },
            { "id": 2, "status": "Pending" },
            { "id": 3, "employeeName": "Ahmed Hassan", "paymentDate": "2024-01-15", "basicSalary": 65000 },
            { "id": 3, "employeeName": "Sarah Johnson", "paymentDate": "2024-01-15", "basicSalary": 90000, "status": "Modified" },
            { "id": 5, "employeeName": "Mohamed Ali", "paymentDate": "", "basicSalary": 70000, "status": "Modified" }
        ]))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    let statuses: Vec<&str> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(
        statuses,
        vec![
            "Loaded",
            "Skipped",
            "Failed: Duplicate ID",
            "Failed: Duplicate ID",
            "Failed: Missing required fields",
        ]
    );
    assert_eq!(body["summary"], json!("Success: 0, Failed: 3, Unchanged: 1, Skipped: 1"));
    assert_eq!(body["counts"]["failed"], json!(3));
}

#[actix_web::test]
async fn sample_round_trips_through_stats() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/payroll/sample").to_request()).await;
    assert_eq!(sample.as_array().unwrap().len(), 7);

    let req = post("/api/v1/payroll/stats").set_json(&sample).to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(stats["employees"], json!(7));
    assert_eq!(stats["awaitingSubmit"], json!(0));
    assert_eq!(stats["failed"], json!(0));
}

#[actix_web::test]
async fn export_sends_csv_attachment() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/payroll/sample").to_request()).await;

    let resp = test::call_service(&app, post("/api/v1/payroll/export").set_json(&sample).to_request()).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment; filename=\"payroll-data-"));
    assert!(disposition.ends_with(".csv\""));

    let body = test::read_body(resp).await;
    let text = std::str::from_utf8(&body).unwrap();
    assert_eq!(text.lines().count(), 8);
    assert!(text.starts_with("ID,Employee Name,"));
}

#[actix_web::test]
async fn import_parses_csv_as_pending() {
    let app = app!();
    let req = post("/api/v1/payroll/import?nextId=8")
        .insert_header((header::CONTENT_TYPE, "text/csv"))
        .set_payload("Employee Name,Payment Date,Basic Salary\nJane Smith,2024-01-15,85000\n")
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], json!("Imported 1 records"));
    assert_eq!(body["records"][0]["id"], json!(8));
    assert_eq!(body["records"][0]["status"], json!("Pending"));
    assert_eq!(body["records"][0]["bonusRate"], json!(3269.23));
}

#[actix_web::test]
async fn import_rejects_empty_and_headerless_input() {
    let app = app!();

    let resp = test::call_service(&app, post("/api/v1/payroll/import").set_payload("  ").to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], json!("CSV body is empty"));

    let resp = test::call_service(
        &app,
        post("/api/v1/payroll/import").set_payload("ID,Employee Name\n").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn import_is_rate_limited_separately() {
    let app = app!();
    let csv = "ID,Employee Name,Payment Date,Basic Salary\n1,John Doe,2024-01-15,75000\n";

    for _ in 0..2 {
        let resp = test::call_service(&app, post("/api/v1/payroll/import").set_payload(csv).to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    let resp = test::call_service(&app, post("/api/v1/payroll/import").set_payload(csv).to_request()).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

    // the rest of the API is unaffected
    let resp = test::call_service(&app, get("/api/v1/payroll/sample").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn oversized_import_is_refused() {
    let app = app!();
    let mut csv = String::from("Employee Name,Payment Date,Basic Salary\n");
    while csv.len() <= 512 {
        csv.push_str("Lisa Chen,2024-01-15,80000\n");
    }

    let resp = test::call_service(&app, post("/api/v1/payroll/import").set_payload(csv).to_request()).await;

    assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[actix_web::test]
async fn payroll_search_returns_indices() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/payroll/sample").to_request()).await;

    let req = post("/api/v1/payroll/search?query=chen").set_json(&sample).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["matches"], json!([5]));
}

#[actix_web::test]
async fn leave_submit_enforces_single_kind() {
    let app = app!();
    let req = post("/api/v1/leave/submit")
        .set_json(json!([
            { "id": 1, "employeeName": "John Doe", "employeeId": "EMP001", "date": "2024-01-15", "regular": 1, "status": "Loaded" },
            { "id": 4, "employeeName": "Lisa Chen", "employeeId": "EMP006", "date": "2024-01-22", "sick": 1, "unpaid": 1, "status": "Pending" },
            { "id": 5, "employeeName": "Omar Khalil", "employeeId": "EMP007", "date": "2024-01-23", "other": 1, "status": "Pending" }
        ]))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["records"][1]["status"], json!("Failed: Multiple leave types selected"));
    assert_eq!(body["records"][2]["status"], json!("Success"));
    assert_eq!(body["summary"], json!("Success: 1, Failed: 1, Unchanged: 1, Skipped: 0"));
}

#[actix_web::test]
async fn leave_summary_uses_defaults_and_rejects_bad_balances() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/leave/sample").to_request()).await;

    let req = post("/api/v1/leave/summary")
        .set_json(json!({ "records": sample, "employeeId": "EMP001" }))
        .to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(summary["totalConsumed"], json!(5));
    assert_eq!(summary["consumed"]["regular"], json!(5));
    assert_eq!(summary["totalEntitled"], json!({ "primary": 35.0, "secondary": 25.0 }));
    assert_eq!(summary["remaining"], json!({ "primary": 30.0, "secondary": 20.0 }));

    let req = post("/api/v1/leave/summary")
        .set_json(json!({ "records": [], "balances": { "otherDaysEntitled": -1 } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn leave_search_matches_code() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/leave/sample").to_request()).await;

    let req = post("/api/v1/leave/search?employeeId=EMP003").set_json(&sample).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["matches"], json!([2]));
}

#[actix_web::test]
async fn timesheet_totals_sum_clock_columns() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/timesheet/sample").to_request()).await;
    assert_eq!(sample.as_array().unwrap().len(), 5);

    let req = post("/api/v1/timesheet/totals").set_json(&sample).to_request();
    let totals: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(totals["totalHours"], json!(35.5));
    assert_eq!(totals["overtime"], json!(3.5));
    assert_eq!(totals["wastedTime"], json!(2.25));
    assert_eq!(totals["bonus"], json!(250.0));
    assert_eq!(totals["netValue"], json!(1.25));
}

#[actix_web::test]
async fn timesheet_submit_saves_every_entry() {
    let app = app!();
    let req = post("/api/v1/timesheet/submit")
        .set_json(json!([
            { "id": 1, "name": "John Doe", "totalHours": "08:30:00", "status": "Active" },
            { "id": 2, "name": "Jane Smith", "bonus": "75", "status": "Approved" }
        ]))
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["message"], json!("Successfully saved 2 timesheet entries"));
    assert_eq!(body["records"][0]["status"], json!("Saved"));
    assert_eq!(body["records"][1]["status"], json!("Saved"));
    assert_eq!(body["records"][1]["bonus"], json!(75.0));
}

#[actix_web::test]
async fn timesheet_export_and_weekly_summary() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/timesheet/sample").to_request()).await;

    let resp = test::call_service(&app, post("/api/v1/timesheet/export").set_json(&sample).to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"timesheet-data-"));
    let body = test::read_body(resp).await;
    assert!(std::str::from_utf8(&body).unwrap().starts_with("Name,Day,Date,Check In,"));

    let req = post("/api/v1/timesheet/weekly").set_json(&sample).to_request();
    let weeks: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(weeks.as_array().unwrap().len(), 5);
    assert_eq!(weeks[0]["employeeName"], json!("John Doe"));
    assert_eq!(weeks[0]["totalPay"], json!(35.0));
    assert_eq!(weeks[4]["daysWorked"], json!(0));
}

#[actix_web::test]
async fn timesheet_search_matches_notes() {
    let app = app!();
    let sample: Value =
        test::call_and_read_body_json(&app, get("/api/v1/timesheet/sample").to_request()).await;

    let req = post("/api/v1/timesheet/search?query=training").set_json(&sample).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["matches"], json!([4]));
}

#[actix_web::test]
async fn import_survives_out_of_range_ids() {
    let app = app!();
    let req = post("/api/v1/payroll/import?nextId=18446744073709551615")
        .set_payload("ID,Employee Name,Payment Date,Basic Salary\n1e30,Omar Khalil,2024-01-15,60000\n")
        .to_request();

    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["records"][0]["id"], json!(9007199254740991u64));
}
