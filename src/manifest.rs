//! package.json read, merge and write.

use anyhow::{bail, Context, Result};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

pub const MANIFEST_FILE: &str = "package.json";

pub fn read(dir: &Path) -> Result<Map<String, Value>> {
    let path = dir.join(MANIFEST_FILE);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    match value {
        Value::Object(map) => Ok(map),
        _ => bail!("{} is not a JSON object", path.display()),
    }
}

pub fn write(dir: &Path, pkg: &Map<String, Value>) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    let content = serde_json::to_string_pretty(pkg)?;
    fs::write(&path, content + "\n")
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Merge the fixed packaging fields into a freshly initialized
/// manifest. Existing script entries are preserved unless they collide
/// with the fixed keys; re-running on the result is a no-op.
pub fn finalize(mut pkg: Map<String, Value>) -> Map<String, Value> {
    pkg.insert("files".into(), json!(["./bin/*", "./lib/*"]));
    pkg.insert("main".into(), json!("./lib/index.js"));
    pkg.insert("typings".into(), json!("./lib/index.d.ts"));

    let mut scripts = match pkg.remove("scripts") {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    scripts.insert("build".into(), json!("tsc"));
    scripts.insert("lint".into(), json!("tslint -c tslint.json src/**/*.ts"));
    scripts.insert("prepublish".into(), json!("npm run build"));
    pkg.insert("scripts".into(), Value::Object(scripts));

    // Registry-injected fields that must not be written back.
    pkg.remove("_id");
    pkg.remove("readme");

    pkg
}
