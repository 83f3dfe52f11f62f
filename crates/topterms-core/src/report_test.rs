use chrono::{NaiveDate, TimeZone, Utc};
use serde_json::Value;

use super::*;

fn key(term: &str, rank: u64) -> GroupKey {
    GroupKey {
        search_term: term.to_owned(),
        department: "Amazon.com".to_owned(),
        search_frequency_rank: rank,
    }
}

fn product(asin: &str, click_share: f64, conversion_share: f64, rank: u32) -> RankedProduct {
    RankedProduct {
        asin: asin.to_owned(),
        title: format!("Title {asin}"),
        click_share,
        conversion_share,
        click_share_rank: rank,
    }
}

fn meta() -> ReportMeta {
    ReportMeta {
        report_id: "1520525020276".to_owned(),
        marketplace_id: "ATVPDKIKX0DER".to_owned(),
        week_start_date: NaiveDate::from_ymd_opt(2025, 4, 6).unwrap(),
        week_end_date: NaiveDate::from_ymd_opt(2025, 4, 12).unwrap(),
    }
}

fn ingested() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, 14, 8, 30, 0).unwrap()
}

#[test]
fn from_group_fills_all_three_slots() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![
            product("B001", 12.5, 4.0, 1),
            product("B002", 8.25, 2.5, 2),
            product("B003", 3.0, 1.0, 3),
        ],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());

    assert_eq!(row.search_term, "knee brace");
    assert_eq!(row.search_frequency_rank, 42);
    assert_eq!(row.department, "Amazon.com");
    assert_eq!(row.clicked_asin_1, "B001");
    assert_eq!(row.clicked_asin_2, "B002");
    assert_eq!(row.clicked_asin_3, "B003");
    assert_eq!(row.product_title_2, "Title B002");
    assert!((row.click_share_3 - 3.0).abs() < f64::EPSILON);
}

#[test]
fn from_group_pads_missing_slots_with_empty_and_zero() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![product("B001", 12.5, 4.0, 1)],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());

    assert_eq!(row.clicked_asin_2, "");
    assert_eq!(row.product_title_2, "");
    assert!((row.click_share_2 - 0.0).abs() < f64::EPSILON);
    assert!((row.conversion_share_3 - 0.0).abs() < f64::EPSILON);
}

#[test]
fn from_group_totals_sum_present_slots() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![product("B001", 12.5, 4.0, 1), product("B002", 8.25, 2.5, 2)],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());

    assert!((row.total_click_share - 20.75).abs() < 1e-9);
    assert!((row.total_conversion_share - 6.5).abs() < 1e-9);
    let slot_sum = row.click_share_1 + row.click_share_2 + row.click_share_3;
    assert!((row.total_click_share - slot_sum).abs() < 1e-9);
}

#[test]
fn from_group_formats_ingested_at_as_rfc3339_millis() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![product("B001", 12.5, 4.0, 1)],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());
    assert_eq!(row.ingested_at, "2025-04-14T08:30:00.000Z");
}

#[test]
fn row_serializes_with_exact_schema_field_names() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![product("B001", 12.5, 4.0, 1)],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());
    let value: Value = serde_json::to_value(&row).unwrap();
    let object = value.as_object().unwrap();

    let expected = [
        "search_term",
        "search_frequency_rank",
        "department",
        "clicked_asin_1",
        "product_title_1",
        "click_share_1",
        "conversion_share_1",
        "clicked_asin_2",
        "product_title_2",
        "click_share_2",
        "conversion_share_2",
        "clicked_asin_3",
        "product_title_3",
        "click_share_3",
        "conversion_share_3",
        "total_click_share",
        "total_conversion_share",
        "report_id",
        "marketplace_id",
        "week_start_date",
        "week_end_date",
        "ingested_at",
    ];
    for name in expected {
        assert!(object.contains_key(name), "missing field {name}");
    }
    assert_eq!(object.len(), expected.len());
    assert_eq!(object["week_start_date"], "2025-04-06");
    assert_eq!(object["week_end_date"], "2025-04-12");
}

#[test]
fn row_serializes_fields_in_declaration_order() {
    let group = TermGroup {
        key: key("knee brace", 42),
        products: vec![product("B001", 12.5, 4.0, 1)],
    };
    let row = SearchTermRow::from_group(&group, &meta(), ingested());
    let json = serde_json::to_string(&row).unwrap();

    let pos = |needle: &str| json.find(needle).unwrap_or_else(|| panic!("{needle} missing"));
    assert!(pos("\"search_term\"") < pos("\"search_frequency_rank\""));
    assert!(pos("\"clicked_asin_1\"") < pos("\"product_title_1\""));
    assert!(pos("\"conversion_share_1\"") < pos("\"clicked_asin_2\""));
    assert!(pos("\"conversion_share_3\"") < pos("\"total_click_share\""));
    assert!(pos("\"total_conversion_share\"") < pos("\"report_id\""));
    assert!(pos("\"week_end_date\"") < pos("\"ingested_at\""));
}
