// Run the same experiment over several values of one parameter, e.g.
// changing the number of leja points while keeping the shape fixed.
//
//   { "algorithm": "sweep", "base": {...}, "param": "leja/count",
//     "values": [500, 1000, 2000] }

use std::io::{Error, ErrorKind};

use json::JsonValue;
use log::info;

// Set the value at a '/' separated path, creating objects on the way.
// Numeric path parts index into arrays.
fn set_json_param(root : &mut JsonValue, path : &[&str], val : JsonValue) {
    let (name, rest) = match path.split_first() {
        Some(split) => split,
        None => {
            *root = val;
            return;
        }
    };
    let child = if root.is_array() {
        let id = name.parse::<usize>().unwrap_or(0);
        &mut root[id]
    } else {
        &mut root[*name]
    };
    set_json_param(child, rest, val);
}

pub fn make_configs(input : &JsonValue) -> std::io::Result<Vec<JsonValue>> {
    let base = &input["base"];
    if !base.is_object() {
        return Err(Error::new(ErrorKind::InvalidData, "Missing base configuration"));
    }
    let param = input["param"].as_str().ok_or_else(
        || Error::new(ErrorKind::InvalidData, "Missing sweep parameter")
    )?;
    if !input["values"].is_array() || input["values"].is_empty() {
        return Err(Error::new(ErrorKind::InvalidData, "Missing sweep values"));
    }
    let path : Vec<&str> = param.split('/').collect();
    let configs : Vec<JsonValue> = input["values"].members().map(
        |value| {
            let mut config = base.clone();
            set_json_param(&mut config, &path, value.clone());
            config
        }
    ).collect();
    info!("Sweeping {} over {} values", param, configs.len());
    Ok(configs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sweep_leja_count() {
        let input = json::parse(r#"{
            "algorithm": "sweep",
            "base": {"algorithm": "leja-julia", "leja": {"count": 10, "s": 0.1}},
            "param": "leja/count",
            "values": [500, 1000]
        }"#).unwrap();
        let configs = make_configs(&input).unwrap();
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[0]["leja"]["count"].as_usize(), Some(500));
        assert_eq!(configs[1]["leja"]["count"].as_usize(), Some(1000));
        // Untouched parameters are kept
        assert_eq!(configs[1]["leja"]["s"].as_f64(), Some(0.1));
        assert_eq!(configs[1]["algorithm"].as_str(), Some("leja-julia"));
    }

    #[test]
    fn test_sweep_creates_missing_objects_and_indexes_arrays() {
        let input = json::parse(r#"{
            "base": {"shapes": [{"type": "square", "size": 10}]},
            "param": "shapes/0/size",
            "values": [20]
        }"#).unwrap();
        let configs = make_configs(&input).unwrap();
        assert_eq!(configs[0]["shapes"][0]["size"].as_u32(), Some(20));
        assert_eq!(configs[0]["shapes"][0]["type"].as_str(), Some("square"));

        let mut root = JsonValue::new_object();
        set_json_param(&mut root, &["zoom", "factor"], 50.into());
        assert_eq!(root["zoom"]["factor"].as_usize(), Some(50));
    }

    #[test]
    fn test_sweep_errors() {
        let no_base = json::parse(r#"{"param": "size", "values": [1]}"#).unwrap();
        assert!(make_configs(&no_base).is_err());
        let no_values = json::parse(r#"{"base": {}, "param": "size"}"#).unwrap();
        assert!(make_configs(&no_values).is_err());
        let no_param = json::parse(r#"{"base": {}, "values": [1]}"#).unwrap();
        assert!(make_configs(&no_param).is_err());
    }
}
