use super::{base_url, escape_literal, user_prompt};
use crate::request::RequestOptions;
use anyhow::Result;

const QUARKUS_LANGCHAIN4J_VERSION: &str = "0.21.0";

/// Quarkus application using the langchain4j OpenAI extension.
pub async fn quarkus_langchain4j_generator(options: RequestOptions) -> Result<String> {
    let base_url = base_url(&options);
    let prompt = escape_literal(&user_prompt(&options));

    Ok(format!(
        r#"<!-- pom.xml -->
<dependency>
  <groupId>io.quarkiverse.langchain4j</groupId>
  <artifactId>quarkus-langchain4j-openai</artifactId>
  <version>{QUARKUS_LANGCHAIN4J_VERSION}</version>
</dependency>

# application.properties
quarkus.langchain4j.openai.base-url={base_url}
quarkus.langchain4j.openai.api-key=sk-no-key-required
quarkus.langchain4j.openai.timeout=120s

// AiService.java
@RegisterAiService
public interface AiService {{
  @SystemMessage("You are a helpful assistant.")
  String chat(@UserMessage String question);
}}

// Usage
@Inject
AiService aiService;

String answer = aiService.chat("{prompt}");
"#
    ))
}
