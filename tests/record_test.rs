// ABOUTME: Tests for decoding APOD metadata into ApodRecord
// ABOUTME: Covers required fields, optional concepts, URL selection and date parsing

use apod_wallpaper::{error::AppError, record::ApodRecord};
use chrono::NaiveDate;
use serde_json::{json, Value};

const SAMPLE: &str = r#"{"title":"T","date":"2024-01-01","hdurl":"http://x/hd.jpg","url":"http://x/sd.jpg","media_type":"image","explanation":"E","copyright":"C"}"#;

const REQUIRED_FIELDS: [&str; 7] = [
    "title",
    "date",
    "hdurl",
    "url",
    "media_type",
    "explanation",
    "copyright",
];

fn sample_value() -> Value {
    serde_json::from_str(SAMPLE).expect("sample is valid JSON")
}

#[test]
fn test_decode_sample_record() {
    let record = ApodRecord::from_json(SAMPLE.as_bytes()).expect("Sample should decode");

    assert_eq!(record.title, "T");
    assert_eq!(record.date, "2024-01-01");
    assert_eq!(record.hdurl, "http://x/hd.jpg");
    assert_eq!(record.url, "http://x/sd.jpg");
    assert_eq!(record.media_type, "image");
    assert_eq!(record.explanation, "E");
    assert_eq!(record.copyright, "C");
    assert_eq!(record.concepts, None);
}

#[test]
fn test_decode_preserves_realistic_values() {
    let payload = json!({
        "copyright": "\nJohn Doe\n",
        "date": "2023-11-05",
        "explanation": "A \"quoted\" explanation with unicode: Ω, ☄️ and newlines.\nSecond line.",
        "hdurl": "https://apod.nasa.gov/apod/image/2311/Comet_big.jpg",
        "media_type": "image",
        "service_version": "v1",
        "title": "Comet & Nebula",
        "url": "https://apod.nasa.gov/apod/image/2311/Comet_1024.jpg"
    });

    let record = ApodRecord::from_json(payload.to_string().as_bytes()).expect("Should decode");

    assert_eq!(record.copyright, "\nJohn Doe\n");
    assert_eq!(record.date, "2023-11-05");
    assert_eq!(
        record.explanation,
        "A \"quoted\" explanation with unicode: Ω, ☄️ and newlines.\nSecond line."
    );
    assert_eq!(record.title, "Comet & Nebula");
    assert_eq!(
        record.hdurl,
        "https://apod.nasa.gov/apod/image/2311/Comet_big.jpg"
    );
    assert_eq!(
        record.url,
        "https://apod.nasa.gov/apod/image/2311/Comet_1024.jpg"
    );
}

#[test]
fn test_reencoded_record_decodes_to_same_value() {
    let record = ApodRecord::from_json(SAMPLE.as_bytes()).unwrap();
    let encoded = serde_json::to_vec(&record).unwrap();

    assert_eq!(ApodRecord::from_json(&encoded).unwrap(), record);
}

#[test]
fn test_missing_required_field_fails() {
    for field in REQUIRED_FIELDS {
        let mut value = sample_value();
        value.as_object_mut().unwrap().remove(field);

        match ApodRecord::from_json(value.to_string().as_bytes()) {
            Err(AppError::Decode(msg)) => assert!(
                msg.contains(field),
                "Error for missing '{}' should name it: {}",
                field,
                msg
            ),
            other => panic!("Expected Decode error without '{}', got {:?}", field, other),
        }
    }
}

#[test]
fn test_wrong_type_fails() {
    let mut value = sample_value();
    value["title"] = json!(42);

    let result = ApodRecord::from_json(value.to_string().as_bytes());
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[test]
fn test_non_json_payload_fails() {
    let result = ApodRecord::from_json(b"<html>Service Unavailable</html>");
    assert!(matches!(result, Err(AppError::Decode(_))));

    let result = ApodRecord::from_json(b"");
    assert!(matches!(result, Err(AppError::Decode(_))));
}

#[test]
fn test_concepts_is_optional() {
    let mut value = sample_value();
    value["concepts"] = json!("galaxies, nebulae");

    let record = ApodRecord::from_json(value.to_string().as_bytes()).unwrap();
    assert_eq!(record.concepts.as_deref(), Some("galaxies, nebulae"));

    value["concepts"] = Value::Null;
    let record = ApodRecord::from_json(value.to_string().as_bytes()).unwrap();
    assert_eq!(record.concepts, None);
}

#[test]
fn test_image_url_follows_hd_preference() {
    let record = ApodRecord::from_json(SAMPLE.as_bytes()).unwrap();

    assert_eq!(record.image_url(true), "http://x/hd.jpg");
    assert_eq!(record.image_url(false), "http://x/sd.jpg");
}

#[test]
fn test_media_type() {
    let record = ApodRecord::from_json(SAMPLE.as_bytes()).unwrap();
    assert!(record.is_image());

    let mut value = sample_value();
    value["media_type"] = json!("video");
    let record = ApodRecord::from_json(value.to_string().as_bytes()).unwrap();
    assert!(!record.is_image());
}

#[test]
fn test_parsed_date() {
    let record = ApodRecord::from_json(SAMPLE.as_bytes()).unwrap();
    assert_eq!(
        record.parsed_date().unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    );

    let mut value = sample_value();
    value["date"] = json!("01/01/2024");
    let record = ApodRecord::from_json(value.to_string().as_bytes()).unwrap();
    assert!(matches!(record.parsed_date(), Err(AppError::Decode(_))));
}
