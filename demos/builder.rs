//! Registering a schema by hand and binding into a dynamic record

use std::collections::HashMap;

use envtag::{bind, DynamicRecord, Schema};

fn main() -> anyhow::Result<()> {
    let schema = Schema::builder()
        .text("environment", "ENVIRONMENT;oneof=development,test,staging,production")
        .text("api_url", "API_URL;format=URL")
        .integer("concurrency", "CONCURRENCY;optional;min=1;max=32")
        .float("version", "VERSION;optional")
        .build();

    // Any Lookup works; a map keeps the example independent of the process environment
    let env: HashMap<String, String> = [
        ("ENVIRONMENT", "staging"),
        ("API_URL", "https://api.example.com/v1"),
        ("CONCURRENCY", "8"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    let mut record = DynamicRecord::new(&schema);
    bind(&schema, &mut record, &env)?;

    println!("{}", serde_json::to_string_pretty(&record)?);

    for (field, value) in record.to_env_strings() {
        println!("{field}={value}");
    }

    Ok(())
}
