mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_chat_flow_from_wish_to_itinerary() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    // Wish
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "peaceful mountains"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["state"]["step"], "budget");
    assert_eq!(turn["state"]["travelWish"], "peaceful mountains");
    assert_eq!(turn["messages"].as_array().unwrap().len(), 2);
    assert_eq!(turn["messages"][0]["role"], "user");
    assert!(turn["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("\"peaceful mountains\""));
    assert_eq!(turn["budgetSuggestions"].as_array().unwrap().len(), 4);

    // Budget
    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"state": turn["state"], "message": "$3,000"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["state"]["step"], "destinations");
    assert_eq!(turn["state"]["budget"], 3000);
    let destinations = turn["destinations"].as_array().unwrap();
    assert_eq!(destinations.len(), 6);
    assert_eq!(destinations[0]["id"], "banff");
    assert_eq!(destinations[1]["id"], "swiss-alps");
    assert!(turn["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("$3,000"));

    // Selection of a destination without a stored plan
    let req = test::TestRequest::post()
        .uri("/api/chat/select")
        .set_json(json!({"state": turn["state"], "destination": destinations[0]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["state"]["step"], "itinerary");
    assert_eq!(turn["state"]["selectedDestination"]["id"], "banff");
    assert_eq!(turn["plan"]["id"], "swiss-alps");
    assert_eq!(turn["messages"][0]["content"], "I choose Banff, Canada!");

    let reply = turn["messages"][1]["content"].as_str().unwrap();
    assert!(reply.contains("3-day itinerary"));
    assert!(reply.contains("11 carefully selected experiences"));
    assert!(reply.contains("$3,000 budget"));
}

#[actix_rt::test]
#[serial]
async fn test_chat_rejects_non_numeric_budget() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({
            "state": {"step": "budget", "travelWish": "beach"},
            "message": "not sure yet"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["state"]["step"], "budget");
    assert!(turn.get("destinations").is_none());
    assert!(turn["messages"][1]["content"]
        .as_str()
        .unwrap()
        .starts_with("I need a numeric budget"));
}

#[actix_rt::test]
#[serial]
async fn test_chat_store_failure_apologizes() {
    let test_app = TestApp::new();
    test_app.store.set_failing(true);
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({
            "state": {"step": "budget", "travelWish": "beach"},
            "message": "2500"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["state"]["step"], "budget");
    assert!(turn["messages"][1]["content"]
        .as_str()
        .unwrap()
        .starts_with("I apologize"));
}

#[actix_rt::test]
#[serial]
async fn test_chat_selection_with_stored_plan() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/chat/select")
        .set_json(json!({
            "state": {"step": "destinations", "travelWish": "temples", "budget": 4000},
            "destination": {
                "id": "kyoto",
                "name": "Kyoto",
                "country": "Japan",
                "estimatedCost": 2600,
                "coordinates": {"lat": 35.0116, "lng": 135.7681}
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let turn: serde_json::Value = test::read_body_json(resp).await;

    assert_eq!(turn["plan"]["id"], "kyoto");
    assert!(turn["messages"][1]["content"]
        .as_str()
        .unwrap()
        .contains("12 carefully selected experiences"));
}

#[actix_rt::test]
#[serial]
async fn test_chat_blank_message() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/chat")
        .set_json(json!({"message": "   "}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "message is required");
}

#[actix_rt::test]
#[serial]
async fn test_select_without_destination_id() {
    let test_app = TestApp::new();
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/chat/select")
        .set_json(json!({
            "destination": {
                "name": "Nowhere",
                "country": "Unknown",
                "estimatedCost": 0,
                "coordinates": {"lat": 0.0, "lng": 0.0}
            }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "destination id is required");
}
