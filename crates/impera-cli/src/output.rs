use serde::Serialize;
use serde_json::json;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Wire envelope for every command. Exactly one of `data` and `error` is
/// present; consumers branch on `success`.
#[derive(Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn render<T: Serialize>(envelope: &Envelope<T>) -> String {
    serde_json::to_string(envelope).unwrap_or_else(|e| {
        format!(
            r#"{{"success":false,"api_version":"{}","error":"envelope serialization failed: {}"}}"#,
            API_VERSION, e
        )
    })
}

pub fn output_success<T: Serialize>(data: T) {
    let envelope = Envelope {
        success: true,
        api_version: API_VERSION,
        data: Some(data),
        error: None,
    };
    println!("{}", render(&envelope));
}

/// Collection results carry their length alongside the items.
pub fn output_list<T: Serialize>(items: Vec<T>) {
    let count = items.len();
    output_success(json!({ "items": items, "count": count }));
}

/// Error envelope on stderr, exit code 1. Scripts and CI key off both.
pub fn output_error(message: &str) -> ! {
    let envelope: Envelope<()> = Envelope {
        success: false,
        api_version: API_VERSION,
        data: None,
        error: Some(message.to_string()),
    };
    eprintln!("{}", render(&envelope));
    std::process::exit(1);
}
