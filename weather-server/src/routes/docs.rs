//! API documentation - Swagger UI and OpenAPI spec.

use axum::{
    Json, Router,
    response::Html,
    routing::get,
};
use serde_json::{Value, json};

use crate::state::AppState;

pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

const SWAGGER_UI_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Weather API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        body { margin: 0; background: #fafafa; }
        .swagger-ui .topbar { display: none; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {
            window.ui = SwaggerUIBundle({
                url: "/api-docs/openapi.json",
                dom_id: "#swagger-ui",
                deepLinking: true
            });
        };
    </script>
</body>
</html>"##;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(DOCS_PATH, get(swagger_ui))
        .route(OPENAPI_PATH, get(openapi_json))
}

async fn swagger_ui() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

async fn openapi_json() -> Json<Value> {
    Json(openapi_document())
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/Error" } }
        }
    })
}

fn json_response(description: &str, schema: Value) -> Value {
    json!({
        "description": description,
        "content": { "application/json": { "schema": schema } }
    })
}

fn data_input_body() -> Value {
    json!({
        "required": true,
        "content": {
            "application/json": { "schema": { "$ref": "#/components/schemas/DataInput" } }
        }
    })
}

fn id_param() -> Value {
    json!({
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn entry_ref() -> Value {
    json!({ "$ref": "#/components/schemas/DataEntry" })
}

fn weather_paths() -> Value {
    json!({
        "get": {
            "summary": "Fetch current weather for a city and store the provider response",
            "parameters": [{
                "name": "city",
                "in": "path",
                "required": true,
                "schema": { "type": "string" }
            }],
            "responses": {
                "200": json_response(
                    "Stored weather record",
                    json!({ "$ref": "#/components/schemas/WeatherRecord" }),
                ),
                "400": error_response("City missing"),
                "500": error_response("Provider or database failure")
            }
        }
    })
}

fn data_collection_paths() -> Value {
    json!({
        "get": {
            "summary": "List all data entries",
            "responses": {
                "200": json_response("All entries", json!({ "type": "array", "items": entry_ref() })),
                "500": error_response("Database failure")
            }
        },
        "post": {
            "summary": "Create a data entry",
            "requestBody": data_input_body(),
            "responses": {
                "200": json_response("Created entry", entry_ref()),
                "400": error_response("Missing field or invalid JSON"),
                "500": error_response("Database failure")
            }
        }
    })
}

fn data_item_paths() -> Value {
    json!({
        "put": {
            "summary": "Replace name and value of a data entry",
            "parameters": [id_param()],
            "requestBody": data_input_body(),
            "responses": {
                "200": json_response("Updated entry", entry_ref()),
                "400": error_response("Missing field, invalid id or invalid JSON"),
                "404": error_response("No entry with this id"),
                "500": error_response("Database failure")
            }
        },
        "delete": {
            "summary": "Delete a data entry",
            "parameters": [id_param()],
            "responses": {
                "204": { "description": "Deleted" },
                "400": error_response("Invalid id"),
                "404": error_response("No entry with this id"),
                "500": error_response("Database failure")
            }
        }
    })
}

fn schemas() -> Value {
    let id = json!({ "type": "integer", "format": "int64" });

    json!({
        "Error": {
            "type": "object",
            "required": ["error"],
            "properties": { "error": { "type": "string" } }
        },
        "DataInput": {
            "type": "object",
            "required": ["name", "value"],
            "properties": {
                "name": { "type": "string", "minLength": 1 },
                "value": { "type": "string", "minLength": 1 }
            }
        },
        "DataEntry": {
            "type": "object",
            "required": ["id", "name", "value"],
            "properties": {
                "id": id.clone(),
                "name": { "type": "string" },
                "value": { "type": "string" }
            }
        },
        "WeatherRecord": {
            "type": "object",
            "required": ["id", "city", "data"],
            "properties": {
                "id": id,
                "city": { "type": "string" },
                "data": { "type": "object", "description": "Raw provider response" }
            }
        }
    })
}

/// OpenAPI 3.0 description of every route the server exposes.
pub fn openapi_document() -> Value {
    json!({
        "openapi": "3.0.0",
        "info": {
            "title": "Weather API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Weather proxy and name/value data CRUD API"
        },
        "servers": [{ "url": "/" }],
        "paths": {
            "/": {
                "get": {
                    "summary": "Welcome text",
                    "responses": {
                        "200": {
                            "description": "Static welcome text",
                            "content": { "text/plain": { "schema": { "type": "string" } } }
                        }
                    }
                }
            },
            "/api/weather/{city}": weather_paths(),
            "/api/data": data_collection_paths(),
            "/api/data/{id}": data_item_paths()
        },
        "components": { "schemas": schemas() }
    })
}
