use crate::errors::{AppError, AppResult};
use crate::models::AppSettings;
use std::path::Path;

/// Reads settings from a `.json`, `.yaml` or `.yml` file. A missing file means
/// defaults; unknown keys are ignored and absent keys take their default.
pub fn load_settings(path: &Path) -> AppResult<AppSettings> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "settings file missing, using defaults");
        return Ok(AppSettings::default());
    }

    let raw = std::fs::read_to_string(path)?;
    let settings = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => serde_json::from_str::<AppSettings>(&raw)
            .map_err(|error| AppError::Config(format!("{}: {}", path.display(), error)))?,
        Some("yaml") | Some("yml") => serde_yaml::from_str::<AppSettings>(&raw)?,
        _ => {
            return Err(AppError::Config(format!(
                "Unsupported settings format '{}': expected .json, .yaml or .yml",
                path.display()
            )))
        }
    };

    validate_settings(&settings)?;
    Ok(settings)
}

/// Applies a JSON merge patch on top of `current` and validates the result.
pub fn merge_settings(current: &AppSettings, update: serde_json::Value) -> AppResult<AppSettings> {
    let mut merged = serde_json::to_value(current)?;
    merge_json(&mut merged, update);
    let settings: AppSettings = serde_json::from_value(merged)
        .map_err(|error| AppError::Config(format!("settings update: {}", error)))?;
    validate_settings(&settings)?;
    Ok(settings)
}

fn validate_settings(settings: &AppSettings) -> AppResult<()> {
    if !settings.initial_mrr.is_finite() || settings.initial_mrr < 0.0 {
        return Err(AppError::Config(format!(
            "initialMrr must be a non-negative amount, got {}",
            settings.initial_mrr
        )));
    }
    if settings.page_size == 0 {
        return Err(AppError::Config("pageSize must be at least 1".to_string()));
    }
    Ok(())
}

fn merge_json(target: &mut serde_json::Value, update: serde_json::Value) {
    match (target, update) {
        (serde_json::Value::Object(target_map), serde_json::Value::Object(update_map)) => {
            for (key, value) in update_map {
                merge_json(target_map.entry(key).or_insert(serde_json::Value::Null), value);
            }
        }
        (target, update) => {
            *target = update;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DateRange;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let settings = load_settings(&dir.path().join("settings.yaml")).expect("defaults");
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.initial_mrr, 600_000.0);
        assert_eq!(settings.page_size, 10);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.yml");
        std::fs::write(&path, "pageSize: 5\ndefaultDateRange: 90D\n").expect("write settings");
        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.page_size, 5);
        assert_eq!(settings.default_date_range, DateRange::NinetyDays);
        assert_eq!(settings.counter_duration_ms, 1_200);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"pageSize": 0}"#).expect("write settings");
        assert!(matches!(load_settings(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn merge_patch_updates_only_named_keys() {
        let current = AppSettings::default();
        let updated = merge_settings(&current, serde_json::json!({ "initialMrr": 500000, "topInsightCount": 2 }))
            .expect("merged");
        assert_eq!(updated.initial_mrr, 500_000.0);
        assert_eq!(updated.top_insight_count, 2);
        assert_eq!(updated.page_size, current.page_size);

        let err = merge_settings(&current, serde_json::json!({ "initialMrr": -1 })).expect_err("negative");
        assert!(err.to_string().starts_with("CONFIG_INVALID"));
    }
}
