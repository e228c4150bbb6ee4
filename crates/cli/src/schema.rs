use traitdex_core::emit::IndexPayload;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(IndexPayload);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
