use super::escape_literal;
use crate::request::{Request, RequestBody, RequestOptions};
use anyhow::Result;

/// Methods OkHttp rejects a request body for.
fn forbids_body(method: &str) -> bool {
    matches!(method, "GET" | "HEAD")
}

fn content_type(request: &Request) -> String {
    request
        .headers
        .iter()
        .find(|h| h.key.eq_ignore_ascii_case("content-type"))
        .map(|h| h.value.clone())
        .unwrap_or_else(|| "application/json".to_string())
}

/// OkHttp client code reproducing method, URL, headers and body.
pub async fn java_okhttp_generator(options: RequestOptions) -> Result<String> {
    let request = Request::from(&options);

    let mut body_lines = Vec::new();
    let body_arg = match &request.body {
        Some(_) if forbids_body(&request.method) => "null".to_string(),
        Some(RequestBody::Raw { raw }) => {
            body_lines.push(format!(
                "MediaType mediaType = MediaType.parse(\"{}\");",
                escape_literal(&content_type(&request))
            ));
            body_lines.push(format!(
                "RequestBody body = RequestBody.create(\"{}\", mediaType);",
                escape_literal(raw)
            ));
            "body".to_string()
        }
        Some(RequestBody::Urlencoded { urlencoded }) => {
            body_lines.push("RequestBody body = new FormBody.Builder()".to_string());
            for param in urlencoded {
                body_lines.push(format!(
                    "  .add(\"{}\", \"{}\")",
                    escape_literal(&param.key),
                    escape_literal(&param.value)
                ));
            }
            body_lines.push("  .build();".to_string());
            "body".to_string()
        }
        None if forbids_body(&request.method) => "null".to_string(),
        None => "RequestBody.create(new byte[0], null)".to_string(),
    };

    let mut lines = vec![
        "OkHttpClient client = new OkHttpClient().newBuilder()".to_string(),
        "  .build();".to_string(),
    ];
    lines.extend(body_lines);
    lines.push("Request request = new Request.Builder()".to_string());
    lines.push(format!("  .url(\"{}\")", escape_literal(&request.url)));
    lines.push(format!(
        "  .method(\"{}\", {})",
        escape_literal(&request.method),
        body_arg
    ));
    for header in &request.headers {
        lines.push(format!(
            "  .addHeader(\"{}\", \"{}\")",
            escape_literal(&header.key),
            escape_literal(&header.value)
        ));
    }
    lines.push("  .build();".to_string());
    lines.push("Response response = client.newCall(request).execute();".to_string());

    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::{FormParam, Header};

    #[tokio::test]
    async fn test_post_with_raw_body() {
        let options = RequestOptions {
            url: "http://localhost:8000/v1/chat/completions".to_string(),
            method: Some("POST".to_string()),
            header: vec![Header::new("Content-Type", "application/json")],
            body: Some(RequestBody::raw(r#"{"model":"granite"}"#)),
        };

        let snippet = java_okhttp_generator(options).await.expect("generate");

        assert!(snippet.contains(r#"MediaType.parse("application/json")"#));
        assert!(snippet.contains(r#"RequestBody.create("{\"model\":\"granite\"}", mediaType)"#));
        assert!(snippet.contains(r#".url("http://localhost:8000/v1/chat/completions")"#));
        assert!(snippet.contains(r#".method("POST", body)"#));
        assert!(snippet.contains(r#".addHeader("Content-Type", "application/json")"#));
        assert!(snippet.ends_with("Response response = client.newCall(request).execute();"));
    }

    #[tokio::test]
    async fn test_get_has_null_body() {
        let snippet = java_okhttp_generator(RequestOptions::get("http://example.com"))
            .await
            .expect("generate");
        assert!(snippet.contains(r#".method("GET", null)"#));
        assert!(!snippet.contains("RequestBody body"));
    }

    #[tokio::test]
    async fn test_urlencoded_body() {
        let options = RequestOptions {
            url: "http://example.com/form".to_string(),
            method: Some("PUT".to_string()),
            header: Vec::new(),
            body: Some(RequestBody::Urlencoded {
                urlencoded: vec![FormParam {
                    key: "name".to_string(),
                    value: "value".to_string(),
                }],
            }),
        };

        let snippet = java_okhttp_generator(options).await.expect("generate");
        assert!(snippet.contains("new FormBody.Builder()"));
        assert!(snippet.contains(r#".add("name", "value")"#));
        assert!(snippet.contains(r#".method("PUT", body)"#));
    }
}
