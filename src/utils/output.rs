use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct JsonOut<T> {
    pub ok: bool,
    pub data: T,
}

/// 以 JSON 信封或純文字輸出單一結果
pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", row(&data));
    }
    Ok(())
}

pub fn print_error(json: bool, message: &str, suggestion: &str) {
    if json {
        let body = serde_json::json!({ "ok": false, "error": message, "suggestion": suggestion });
        println!("{}", body);
    } else {
        eprintln!("❌ {}", message);
        eprintln!("💡 {}", suggestion);
    }
}
