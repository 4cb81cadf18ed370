//! A small design system shared by the resolver tests.

#![allow(dead_code)]

use atelier_store::Store;
use atelier_types::Record;
use serde_json::{Value, json};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A `button` component with bound props, a theme collection with a
/// primary colour token, a typography preset and a `users` data model.
pub fn design_system() -> Value {
    json!({
        "screens": [{ "id": "home", "name": "Home" }],
        "components": [{ "id": "button", "name": "Button" }],
        "variableModes": [
            { "id": "light", "name": "Light", "isDefault": true },
            { "id": "dark", "name": "Dark" }
        ],
        "collections": [
            { "id": "theme", "name": "Theme", "modeIds": ["light", "dark"] },
            { "id": "type-scale", "name": "Type scale", "type": "PRESETS", "modeIds": ["light", "dark"] }
        ],
        "tokens": [
            { "id": "primary-color", "name": "Primary", "collectionId": "theme" },
            { "id": "orphan-token", "name": "Orphan", "collectionId": "deleted-collection" }
        ],
        "tokenValues": [
            { "id": "tv-1", "tokenId": "primary-color", "modeId": "light", "value": "#0000FF" },
            { "id": "tv-2", "tokenId": "primary-color", "modeId": "dark", "value": "#000080" }
        ],
        "props": [
            {
                "id": "fill", "name": "Fill", "type": "COLOR",
                "ownership": { "type": "COMPONENT", "id": "button" },
                "defaultValue": "red"
            },
            {
                "id": "label", "name": "Label",
                "ownership": { "type": "COMPONENT", "id": "button" },
                "values": [
                    { "id": "label-a", "value": "Click" },
                    { "id": "label-b", "value": "Submit", "isDefault": true }
                ]
            },
            {
                "id": "visible", "name": "Visible", "type": "BOOLEAN",
                "ownership": { "type": "COMPONENT", "id": "button" },
                "values": [
                    { "id": "visible-yes", "value": true, "isDefault": true },
                    { "id": "visible-no", "value": false }
                ]
            },
            {
                "id": "rows", "name": "Rows", "type": "DATA",
                "ownership": { "type": "COMPONENT", "id": "button" },
                "modelId": "users"
            }
        ],
        "variables": [
            { "id": "greeting", "name": "Greeting", "value": "Hi there" },
            {
                "id": "admins", "name": "Admins", "type": "DATA", "modelId": "users",
                "filters": [{ "field": "role", "value": "admin" }]
            },
            { "id": "all-users", "name": "All users", "type": "DATA", "modelId": "users" }
        ],
        "dataModels": [
            { "id": "users", "name": "Users" },
            { "id": "teams", "name": "Teams" }
        ],
        "dataModelFields": [
            { "id": "user-name", "name": "name", "modelId": "users" },
            { "id": "stray-field", "name": "stray", "modelId": "deleted-model" }
        ],
        "presets": [
            { "id": "heading", "name": "Heading", "type": "TYPOGRAPHY", "collectionId": "type-scale" }
        ],
        "presetModeValues": [
            {
                "id": "heading-light", "presetId": "heading", "modeId": "light",
                "value": { "fontSize": "16px", "fontWeight": 700 }
            },
            {
                "id": "heading-dark", "presetId": "heading", "modeId": "dark",
                "value": { "fontSize": "18px", "fontWeight": 800 }
            }
        ],
        "elements": [
            {
                "id": "title", "tag": "h1",
                "ownership": { "type": "SCREEN", "id": "home" },
                "properties": {
                    "style": { "backgroundColor": "#FAFAFA", "display": "flex" },
                    "content": { "text": "Hello" }
                },
                "bindings": [{ "kind": "DATA_VARIABLE", "id": "greeting" }]
            },
            {
                "id": "swatch", "tag": "div",
                "ownership": { "type": "COMPONENT", "id": "button" },
                "properties": {
                    "style": {
                        "backgroundColor": "#FFFFFF",
                        "binding": {
                            "backgroundColor": { "kind": "PROP", "id": "fill" },
                            "display": { "kind": "PROP", "id": "visible", "propertyName": "display" }
                        }
                    },
                    "content": { "binding": { "kind": "PROP", "id": "label" } }
                }
            },
            {
                "id": "photo", "tag": "img",
                "ownership": { "type": "SCREEN", "id": "home" },
                "properties": {
                    "style": { "backgroundImage": "hero.png", "flexDirection": "column", "alignItems": "stretch" },
                    "content": { "src": "cat.png" }
                }
            },
            {
                "id": "headline", "tag": "p",
                "ownership": { "type": "SCREEN", "id": "home" },
                "properties": { "style": { "color": "red", "marginTop": "8px" } },
                "bindings": [{ "kind": "PRESET_MODE_VALUE", "presetId": "heading", "presetType": "TYPOGRAPHY" }]
            },
            {
                "id": "name-cell", "tag": "span",
                "ownership": { "type": "SCREEN", "id": "home" },
                "properties": {
                    "content": { "binding": { "kind": "DATA_MODEL_FIELD", "id": "user-name" } }
                }
            },
            {
                "id": "user-list", "tag": "ul",
                "ownership": { "type": "SCREEN", "id": "home" },
                "bindings": [{ "kind": "DATA_VARIABLE", "id": "admins" }]
            },
            {
                "id": "broken", "tag": "div",
                "ownership": { "type": "SCREEN", "id": "home" },
                "properties": {
                    "style": {
                        "width": "120px",
                        "binding": {
                            "color": { "kind": "TOKEN", "id": "deleted-token" },
                            "borderColor": { "kind": "TOKEN", "id": "orphan-token" },
                            "backgroundColor": { "kind": "GRADIENT", "id": "g-1" },
                            "opacity": { "kind": "DATA_MODEL_FIELD", "id": "stray-field" }
                        }
                    }
                }
            }
        ],
        "instances": [
            {
                "id": "cta", "componentId": "button",
                "ownership": { "type": "SCREEN", "id": "home" },
                "override": {
                    "props": {
                        "fill": { "value": { "type": "TOKEN", "id": "primary-color" } },
                        "label": { "value": "Buy now" },
                        "visible": { "value": { "type": "PROP_VALUE", "id": "visible-no" } },
                        "rows": { "value": { "type": "DATA_VARIABLE", "id": "admins" } }
                    }
                }
            },
            {
                "id": "plain", "componentId": "button",
                "ownership": { "type": "SCREEN", "id": "home" }
            }
        ],
        "records": {
            "users": [
                { "name": "Ada", "role": "admin" },
                { "name": "Linus", "role": "user" },
                { "name": "Grace", "role": "admin" }
            ]
        }
    })
}

pub fn store() -> Store {
    init_tracing();
    Store::from_snapshot_json(&design_system().to_string()).expect("fixture loads")
}

pub fn record(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        other => panic!("not a record: {other}"),
    }
}
