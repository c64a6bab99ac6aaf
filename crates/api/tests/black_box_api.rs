use reqwest::StatusCode;
use serde_json::{Value, json};

use stratus_infra::AppConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(config: AppConfig) -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = stratus_api::app::build_app(&config).expect("failed to build app");
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}/weatherforecasts", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn empty() -> Self {
        Self::spawn(AppConfig {
            seed_sample_data: false,
            ..AppConfig::default()
        })
        .await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn saline() -> Value {
    json!({
        "id": 1,
        "latitude": 42.166679,
        "longitude": -83.781319,
        "name": "Saline, MI"
    })
}

async fn create(client: &reqwest::Client, srv: &TestServer, body: Value) -> reqwest::Response {
    client
        .post(&srv.base_url)
        .json(&body)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn create_in_celsius_reads_back_in_celsius() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-05-29",
            "temperature": 20,
            "scale": "c",
            "summary": "Mild"
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["id"], 1);
    assert_eq!(body["forecast"]["scale"], "celsius");
    assert_eq!(body["forecast"]["temperature"].as_f64(), Some(20.0));

    let res = client
        .get(format!("{}/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["summary"], "Mild");
    assert_eq!(body["forecast"]["date"], "2020-05-29");
}

#[tokio::test]
async fn fahrenheit_input_is_stored_as_celsius() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let res = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-06-01",
            "temperature": 68,
            "scale": "Fahrenheit",
            "summary": "Mild"
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["scale"], "celsius");
    assert_eq!(body["forecast"]["temperature"].as_f64(), Some(20.0));
}

#[tokio::test]
async fn invalid_input_is_a_client_error() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    let below_absolute_zero = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-05-29",
            "temperature": -300,
            "scale": "celsius",
            "summary": "Impossible"
        }),
    )
    .await;
    assert_eq!(below_absolute_zero.status(), StatusCode::BAD_REQUEST);
    let body: Value = below_absolute_zero.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let unknown_scale = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-05-29",
            "temperature": 10,
            "scale": "unknown",
            "summary": "Cool"
        }),
    )
    .await;
    assert_eq!(unknown_scale.status(), StatusCode::BAD_REQUEST);
    let body: Value = unknown_scale.json().await.unwrap();
    assert_eq!(body["error"], "invalid_scale");

    let bad_latitude = create(
        &client,
        &srv,
        json!({
            "location": { "id": 1, "latitude": 91.0, "longitude": 0.0, "name": "Nowhere" },
            "date": "2020-05-29",
            "temperature": 10,
            "scale": "c",
            "summary": "Cool"
        }),
    )
    .await;
    assert_eq!(bad_latitude.status(), StatusCode::BAD_REQUEST);

    let location_zero = create(
        &client,
        &srv,
        json!({
            "location": { "id": 0, "latitude": 0.0, "longitude": 0.0, "name": "Origin" },
            "date": "2020-05-29",
            "temperature": 10,
            "scale": "c",
            "summary": "Cool"
        }),
    )
    .await;
    assert_eq!(location_zero.status(), StatusCode::BAD_REQUEST);
    let body: Value = location_zero.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");

    let res = client
        .get(format!("{}/0", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let list: Value = client
        .get(&srv.base_url)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(list["weather_forecasts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn lifecycle_update_delete_not_found() {
    let srv = TestServer::empty().await;
    let client = reqwest::Client::new();

    for summary in ["Mild", "Warm"] {
        let res = create(
            &client,
            &srv,
            json!({
                "location": saline(),
                "date": "2020-05-29",
                "temperature": 20,
                "scale": "c",
                "summary": summary
            }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = client
        .put(format!("{}/2", srv.base_url))
        .json(&json!({
            "id": 2,
            "location": saline(),
            "date": "2020-05-30",
            "temperature": 273.15,
            "scale": "k",
            "summary": "Freezing"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["summary"], "Freezing");
    assert_eq!(body["forecast"]["temperature"].as_f64(), Some(0.0));
    assert_eq!(body["forecast"]["date"], "2020-05-30");

    let mismatched = client
        .put(format!("{}/2", srv.base_url))
        .json(&json!({
            "id": 3,
            "location": saline(),
            "date": "2020-05-30",
            "temperature": 1,
            "scale": "c",
            "summary": "Cool"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(mismatched.status(), StatusCode::BAD_REQUEST);

    let res = client
        .delete(format!("{}/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], true);

    let res = client
        .delete(format!("{}/1", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["deleted"], false);

    let res = client
        .get(format!("{}/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Ids follow the highest key, so the deleted id is not reused.
    let res = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-05-31",
            "temperature": 25,
            "scale": "c",
            "summary": "Balmy"
        }),
    )
    .await;
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["id"], 3);
}

#[tokio::test]
async fn by_date_returns_last_match_when_enabled() {
    let mut config = AppConfig {
        seed_sample_data: false,
        ..AppConfig::default()
    };
    config.features.allow_get_forecast_by_date = true;
    let srv = TestServer::spawn(config).await;
    let client = reqwest::Client::new();

    for summary in ["First", "Second"] {
        create(
            &client,
            &srv,
            json!({
                "location": saline(),
                "date": "2020-06-01",
                "temperature": 18,
                "scale": "c",
                "summary": summary
            }),
        )
        .await;
    }

    let res = client
        .get(format!("{}/byDate?location_id=1&date=2020-06-01", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["summary"], "Second");

    let miss = client
        .get(format!("{}/byDate?location_id=1&date=2020-06-02", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(miss.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn by_date_is_not_found_when_disabled() {
    let srv = TestServer::spawn(AppConfig::default()).await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/byDate?location_id=1&date=2020-05-29", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The seeded record itself is still reachable by id.
    let res = client
        .get(format!("{}/1", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn experimental_store_marks_summaries() {
    let mut config = AppConfig {
        seed_sample_data: false,
        ..AppConfig::default()
    };
    config.features.use_experimental_repository = true;
    config.experimental_repository.summary_suffix = " (v2)".to_string();
    let srv = TestServer::spawn(config).await;
    let client = reqwest::Client::new();

    let res = create(
        &client,
        &srv,
        json!({
            "location": saline(),
            "date": "2020-05-29",
            "temperature": 20,
            "scale": "c",
            "summary": "Mild"
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["forecast"]["summary"], "Mild (v2)");
}

#[tokio::test]
async fn experimental_overflow_is_rejected_and_listing_survives() {
    let mut config = AppConfig {
        seed_sample_data: false,
        ..AppConfig::default()
    };
    config.features.use_experimental_repository = true;
    config.experimental_repository.summary_suffix = " (v2)".to_string();
    let srv = TestServer::spawn(config).await;
    let client = reqwest::Client::new();

    let forecast = |summary: String| {
        json!({
            "location": saline(),
            "date": "2020-05-29",
            "temperature": 20,
            "scale": "c",
            "summary": summary
        })
    };

    let res = create(&client, &srv, forecast("Mild".to_string())).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = create(&client, &srv, forecast("s".repeat(1000))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "validation_error");

    let res = client.get(&srv.base_url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let list: Value = res.json().await.unwrap();
    let forecasts = list["weather_forecasts"].as_array().unwrap();
    assert_eq!(forecasts.len(), 1);
    assert_eq!(forecasts[0]["summary"], "Mild (v2)");
}
