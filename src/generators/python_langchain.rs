use super::{base_url, escape_literal, user_prompt};
use crate::request::RequestOptions;
use anyhow::Result;

/// LangChain `ChatOpenAI` client pointed at the request's endpoint.
pub async fn python_langchain_generator(options: RequestOptions) -> Result<String> {
    let base_url = escape_literal(&base_url(&options));
    let prompt = escape_literal(&user_prompt(&options));

    Ok(format!(
        r#"pip install langchain langchain-openai

from langchain_openai import ChatOpenAI
from langchain_core.prompts import ChatPromptTemplate

model_service = "{base_url}"

llm = ChatOpenAI(base_url=model_service, api_key="sk-no-key-required", streaming=True)
prompt = ChatPromptTemplate.from_messages([
    ("system", "You are a helpful assistant."),
    ("user", "{{input}}")
])
chain = prompt | llm
print(chain.invoke({{"input": "{prompt}"}}).content)
"#
    ))
}
