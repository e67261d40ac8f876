use cmdforge_core::{
    Context, DbType, DialectConfig, Parameter, Result, Value, duration_in_days,
    rewrite::{find_call, find_token, replace_function, rewrite_swapped_call},
};

/// Adjusts a single inbound parameter to what the driver can bind.
pub(crate) fn coerce_parameter(config: &DialectConfig, parameter: &mut Parameter) -> Result<()> {
    if parameter.is_inert() {
        return Ok(());
    }
    let native = &config.native_types;
    match &parameter.value {
        Value::Uuid(Some(uuid)) => {
            let text = uuid.simple().to_string();
            parameter.value = Value::Varchar(Some(text));
            parameter.db_type = DbType::StringFixedLength;
            parameter.size = Some(config.guid_length);
            parameter.native_type = Some(native.fixed_string);
        }
        Value::Interval(Some(duration)) if parameter.db_type.is_time_like() => {
            let days = duration_in_days(duration);
            parameter.value = Value::Float64(Some(days));
            parameter.db_type = DbType::Double;
            parameter.native_type = Some(native.numeric_datetime);
        }
        Value::Blob(Some(blob)) if blob.len() > config.binary_threshold => {
            parameter.native_type = Some(native.large_binary);
        }
        Value::Varchar(Some(text))
            if parameter.db_type.is_text() && text.chars().count() > config.text_threshold =>
        {
            parameter.native_type = Some(native.large_text);
        }
        _ if parameter.db_type == DbType::Object => {
            let serialized = parameter
                .value
                .serialize_hex()
                .with_context(|| format!("While preparing parameter `{}`", parameter.name))?;
            parameter.value = Value::Varchar(Some(serialized));
            parameter.db_type = DbType::String;
            parameter.native_type = Some(native.large_text);
        }
        _ if parameter.db_type.is_time_like() => {
            parameter.native_type = Some(native.datetime);
        }
        _ => {}
    }
    Ok(())
}

/// Translated command text, `None` when nothing needed a translation.
pub(crate) fn translate_text(config: &DialectConfig, text: &str) -> Result<Option<String>> {
    let mut result: Option<String> = None;
    for (from, to) in config.function_translations {
        let current = result.as_deref().unwrap_or(text);
        if find_token(current, from, 0).is_some() {
            log::debug!("Translating {} into {}", from, to);
            result = Some(replace_function(current, from, to));
        }
    }
    for (from, to) in config.swapped_functions {
        let current = result.as_deref().unwrap_or(text);
        if find_call(current, from, 0).is_some() {
            log::debug!("Translating {}(a, b) into {}(b, a)", from, to);
            result = Some(rewrite_swapped_call(current, from, to)?);
        }
    }
    Ok(result)
}
