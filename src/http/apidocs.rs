//! Swagger 2.0 description of the API, served at `/apidocs`.

use super::auth::API_KEY_HEADER;
use axum::Json;
use serde_json::{Value, json};
use std::sync::OnceLock;

static DOCUMENT: OnceLock<Value> = OnceLock::new();

/// `GET /apidocs` - no authentication.
pub async fn apidocs() -> Json<Value> {
    Json(document().clone())
}

/// The API description, built on first use.
pub fn document() -> &'static Value {
    DOCUMENT.get_or_init(build)
}

fn chore_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "date": { "type": "string", "format": "date", "example": "2025-02-05" },
            "name": { "type": "string", "example": "Jack" },
            "description": { "type": "string", "example": "Take out the trash" }
        }
    })
}

fn message_schema(example: &str) -> Value {
    json!({
        "type": "object",
        "properties": {
            "message": { "type": "string", "example": example }
        }
    })
}

fn unauthorized() -> Value {
    json!({
        "description": "Unauthorized - Invalid or missing API key",
        "schema": message_schema("Invalid or missing API key")
    })
}

fn path_param(name: &str, description: &str) -> Value {
    json!({
        "in": "path",
        "name": name,
        "type": "string",
        "required": true,
        "description": description
    })
}

fn build() -> Value {
    let chore_list = json!({ "type": "array", "items": chore_schema() });

    json!({
        "swagger": "2.0",
        "info": {
            "title": "CCH App Chores API",
            "description": "API for managing chores and names",
            "version": env!("CARGO_PKG_VERSION")
        },
        "produces": ["application/json"],
        "securityDefinitions": {
            "ApiKeyAuth": { "type": "apiKey", "in": "header", "name": API_KEY_HEADER }
        },
        "security": [{ "ApiKeyAuth": [] }],
        "paths": {
            "/": {
                "get": {
                    "summary": "Check that the API is running",
                    "security": [],
                    "produces": ["text/plain"],
                    "responses": {
                        "200": { "description": "Returns a simple message" }
                    }
                }
            },
            "/chores": {
                "get": {
                    "summary": "Get all chores, oldest first",
                    "responses": {
                        "200": { "description": "A list of chores", "schema": chore_list.clone() },
                        "401": unauthorized()
                    }
                }
            },
            "/chores/{name}": {
                "get": {
                    "summary": "Get the chores assigned to a name, oldest first",
                    "parameters": [
                        path_param("name", "The name of the person whose chores you want to retrieve")
                    ],
                    "responses": {
                        "200": { "description": "A list of chores", "schema": chore_list },
                        "401": unauthorized(),
                        "404": {
                            "description": "No chores for this name",
                            "schema": message_schema("No chores found")
                        }
                    }
                }
            },
            "/chores/{name}/date/{date}": {
                "get": {
                    "summary": "Get the chore assigned to a name on a date",
                    "parameters": [
                        path_param("name", "The name of the person whose chore you want to retrieve"),
                        path_param("date", "The date of the chore, in any format the database accepts for dates")
                    ],
                    "responses": {
                        "200": {
                            "description": "The matching chore description",
                            "schema": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "description": { "type": "string", "example": "Take out the trash" }
                                    }
                                }
                            }
                        },
                        "401": unauthorized(),
                        "404": {
                            "description": "No chore for this name on this date",
                            "schema": message_schema("No chore found")
                        }
                    }
                }
            },
            "/names": {
                "get": {
                    "summary": "Get all names",
                    "responses": {
                        "200": {
                            "description": "A list of names",
                            "schema": {
                                "type": "array",
                                "items": {
                                    "type": "object",
                                    "properties": {
                                        "name": { "type": "string", "example": "Jack" }
                                    }
                                }
                            }
                        },
                        "401": unauthorized()
                    }
                }
            }
        }
    })
}
