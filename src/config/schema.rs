use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "server": {
                "type": "object",
                "properties": {
                    "host": { "type": "string" },
                    "port": { "type": "integer", "minimum": 1, "maximum": 65535 }
                },
                "additionalProperties": false
            },
            "reports": {
                "type": "object",
                "properties": {
                    "path": { "type": "string" },
                    "reference_type": {
                        "type": "string",
                        "enum": [
                            "LBDC_DAYBREAK",
                            "LBDC_ACTIVE_LIST",
                            "LBDC_CALENDAR_ALERT",
                            "LBDC_AGENDA_ALERT",
                            "LBDC_SCRAPED_BILL"
                        ]
                    }
                },
                "additionalProperties": false
            },
            "summary": {
                "type": "object",
                "properties": {
                    "default_range_months": { "type": "integer", "minimum": 1, "maximum": 120 }
                },
                "additionalProperties": false
            }
        },
        "additionalProperties": false
    })
});
