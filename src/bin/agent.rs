//! Scout Agent - 交互式工具调用助手入口
//!
//! 启动时注册工具集（web_search / scrape）并视为会话内封闭集合；
//! 每轮把截断后的用户输入与有界历史交给 ToolAgent，成功才写入历史，
//! 失败打印 Error 后继续。退出指令直接收尾，不再调用模型。

use std::io::{self, BufRead, Write};

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scout::agent::ToolAgent;
use scout::config::load_config;
use scout::llm::create_llm_from_config;
use scout::message::{is_exit_command, ConversationMemory, Message};
use scout::prompts::agent_system_prompt;
use scout::search::FirecrawlClient;
use scout::tools::{tool_call_schema_json, ScrapeTool, ToolRegistry, WebSearchTool};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).context("Failed to load config")?;

    let llm = create_llm_from_config(&cfg);
    let search = Arc::new(FirecrawlClient::new(
        &cfg.search.base_url,
        cfg.search.timeout_secs,
        cfg.search.max_content_chars,
    ));

    let mut tools = ToolRegistry::new();
    tools.register(WebSearchTool::new(
        search.clone(),
        cfg.workflow.max_search_results,
    ));
    tools.register(ScrapeTool::new(
        cfg.search.timeout_secs,
        cfg.search.max_content_chars,
    ));

    let system_prompt =
        agent_system_prompt(&tools.tool_descriptions(), &tool_call_schema_json());
    let agent = ToolAgent::new(
        llm,
        tools,
        cfg.agent.max_tool_rounds,
        cfg.agent.tool_timeout_secs,
    );

    println!(
        "Available tools - {}",
        agent.tools().tool_names().join(" ")
    );
    println!("{}", "-".repeat(60));

    let mut memory = ConversationMemory::new(cfg.agent.max_context_turns);
    let stdin = io::stdin();

    loop {
        print!("\nYou: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Read stdin")? == 0 {
            break; // EOF
        }
        let input = line.trim();

        if is_exit_command(input) {
            println!("Bye!");
            break;
        }
        if input.is_empty() {
            continue;
        }

        // 超长输入截断，避免撑爆模型上下文
        let input: String = input.chars().take(cfg.agent.max_input_chars).collect();

        let mut messages = vec![Message::system(system_prompt.as_str())];
        messages.extend_from_slice(memory.messages());
        messages.push(Message::user(input.as_str()));

        match agent.run_turn(&messages).await {
            Ok(answer) => {
                println!("\nAgent: {}", answer);
                // 成功的轮次才进入历史，失败不留痕
                memory.push(Message::user(input));
                memory.push(Message::assistant(answer));
            }
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}
