//! Test application models and payloads shared by the integration tests.
#![allow(dead_code)]

use sermodel::FieldValues;
use sermodel::prelude::*;

pub const API_TYPES: &[&str] = &["OauthRest", "OauthGraphql", "TokenRest"];
pub const REQUEST_TYPES: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "UPDATE"];

pub static DATA_PROVIDER: ModelMeta = ModelMeta {
    name: "data_provider",
    table_name: "data_providers",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("provider_name").unique(true),
        FieldInfo::text("api_endpoint").nullable(true),
        FieldInfo::relation(
            "oauth_config",
            RelationshipInfo::one_to_one_reverse(oauth_config, "data_provider"),
        ),
        FieldInfo::relation(
            "http_config",
            RelationshipInfo::one_to_one_reverse(http_config, "data_provider"),
        ),
        FieldInfo::relation(
            "endpoints",
            RelationshipInfo::one_to_many(endpoint, "data_provider"),
        ),
    ],
};

pub static OAUTH_CONFIG: ModelMeta = ModelMeta {
    name: "oauth_config",
    table_name: "oauth_configs",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::relation(
            "data_provider",
            RelationshipInfo::one_to_one(data_provider).back_populates("oauth_config"),
        ),
        FieldInfo::text("authorize_url").default_json(r#""""#),
        FieldInfo::text("access_token_url").default_json(r#""""#),
        FieldInfo::text("client_id").default_json(r#""""#),
        FieldInfo::text("client_secret").default_json(r#""""#),
        FieldInfo::json("scope").default_json("[]"),
    ],
};

pub static HTTP_CONFIG: ModelMeta = ModelMeta {
    name: "http_config",
    table_name: "http_configs",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::relation(
            "data_provider",
            RelationshipInfo::one_to_one(data_provider).back_populates("http_config"),
        ),
        FieldInfo::json("header").nullable(true),
        FieldInfo::json("url_encoded_params").nullable(true),
        FieldInfo::text("body_type").nullable(true),
        FieldInfo::text("body_content").nullable(true),
        FieldInfo::text("request_type").nullable(true),
    ],
};

pub static ENDPOINT: ModelMeta = ModelMeta {
    name: "endpoint",
    table_name: "endpoints",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::relation(
            "data_provider",
            RelationshipInfo::many_to_one(data_provider).back_populates("endpoints"),
        ),
        FieldInfo::text("endpoint_name").unique(true).max_length(100),
        FieldInfo::text("endpoint_url").default_json(r#""""#),
        FieldInfo::text("api_type")
            .choices(API_TYPES)
            .default_json(r#""OauthRest""#),
        FieldInfo::text("request_type")
            .choices(REQUEST_TYPES)
            .default_json(r#""GET""#),
        FieldInfo::relation(
            "data_fetches",
            RelationshipInfo::one_to_many(data_fetch, "endpoint"),
        ),
    ],
};

pub static DATA_FETCH: ModelMeta = ModelMeta {
    name: "data_fetch",
    table_name: "data_fetches",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::relation(
            "endpoint",
            RelationshipInfo::many_to_one(endpoint).back_populates("data_fetches"),
        ),
        FieldInfo::integer("status_code").nullable(true),
        FieldInfo::json("data").nullable(true),
    ],
};

pub static TEST_MODEL3: ModelMeta = ModelMeta {
    name: "test_model3",
    table_name: "test_model3",
    primary_key: "id",
    fields: &[FieldInfo::auto("id"), FieldInfo::text("text")],
};

pub static TEST_MODEL2: ModelMeta = ModelMeta {
    name: "test_model2",
    table_name: "test_model2",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("text"),
        FieldInfo::relation("test_model3", RelationshipInfo::many_to_one(test_model3)),
    ],
};

pub static TEST_MODEL1: ModelMeta = ModelMeta {
    name: "test_model1",
    table_name: "test_model1",
    primary_key: "id",
    fields: &[
        FieldInfo::auto("id"),
        FieldInfo::text("text"),
        FieldInfo::relation("test_model2", RelationshipInfo::many_to_one(test_model2)),
    ],
};

fn data_provider() -> &'static ModelMeta {
    &DATA_PROVIDER
}

fn oauth_config() -> &'static ModelMeta {
    &OAUTH_CONFIG
}

fn http_config() -> &'static ModelMeta {
    &HTTP_CONFIG
}

fn endpoint() -> &'static ModelMeta {
    &ENDPOINT
}

fn data_fetch() -> &'static ModelMeta {
    &DATA_FETCH
}

fn test_model3() -> &'static ModelMeta {
    &TEST_MODEL3
}

fn test_model2() -> &'static ModelMeta {
    &TEST_MODEL2
}

/// Labels hidden in every test application filter.
pub const DEFAULT_EXCLUDE: &[&str] = &["dataprovideruser", "data_provider_node"];

pub fn provider_filter(max_depth: usize, extra_exclude: &[&str]) -> SerializableModelFilter {
    SerializableModelFilter::new(
        max_depth,
        DEFAULT_EXCLUDE.iter().chain(extra_exclude).copied(),
        "data_provider",
    )
}

pub fn build_base_with_endpoints_data() -> JsonValue {
    json!({
        "provider_name": "dsfsd4",
        "api_endpoint": null,
        "endpoints": [
            {"endpoint_name": "test1", "endpoint_url": "testurl", "api_type": "OauthRest", "request_type": "GET"},
            {"endpoint_name": "test2", "endpoint_url": "testurl", "api_type": "OauthRest", "request_type": "GET"}
        ]
    })
}

pub fn oauth_data() -> JsonValue {
    json!({
        "authorize_url": "https://www.strava.com/oauth/authorize",
        "access_token_url": "https://www.strava.com/oauth/token",
        "client_id": "28148",
        "client_secret": "secret",
        "scope": ["read", "activity:read"]
    })
}

pub fn http_data() -> JsonValue {
    json!({
        "header": {"User-Agent": "Tinder", "Content-Type": "application-json"},
        "url_encoded_params": {"d": "a", "c": "t"}
    })
}

pub fn build_base_with_oauth_data() -> JsonValue {
    json!({"provider_name": "oauth_only", "oauth_config": oauth_data()})
}

pub fn build_base_with_http_data() -> JsonValue {
    json!({"provider_name": "http_only", "http_config": http_data()})
}

pub fn build_full_data() -> JsonValue {
    json!({
        "provider_name": "full",
        "api_endpoint": "https://api.example.com",
        "oauth_config": oauth_data(),
        "http_config": http_data(),
        "endpoints": [{"endpoint_name": "activities"}]
    })
}

pub fn build_strava_data_provider_json() -> JsonValue {
    json!({
        "provider_name": "strava",
        "api_endpoint": "https://www.strava.com/api/v3",
        "oauth_config": oauth_data(),
        "endpoints": [
            {
                "endpoint_name": "activity",
                "endpoint_url": "activities/{id}",
                "api_type": "OauthRest",
                "request_type": "GET",
                "data_fetches": [
                    {"status_code": 200, "data": {"distance": 1200.5, "type": "Run"}},
                    {"status_code": 404, "data": null}
                ]
            },
            {
                "endpoint_name": "athlete",
                "endpoint_url": "athlete",
                "api_type": "OauthGraphql",
                "request_type": "POST"
            }
        ]
    })
}

/// A provider with two endpoints, created directly through the store.
pub fn create_data_provider_with_endpoints(session: &mut Session) -> Record {
    let provider = session
        .create_row(&DATA_PROVIDER, values(&[("provider_name", Value::from("dsfsd4"))]))
        .unwrap();
    for name in ["test1", "test2"] {
        session
            .create_row(
                &ENDPOINT,
                values(&[
                    ("data_provider", Value::BigInt(provider.key())),
                    ("endpoint_name", Value::from(name)),
                    ("endpoint_url", Value::from("testurl")),
                    ("api_type", Value::from("OauthGraphql")),
                ]),
            )
            .unwrap();
    }
    provider
}

pub fn values(pairs: &[(&'static str, Value)]) -> FieldValues {
    pairs.iter().cloned().collect()
}
