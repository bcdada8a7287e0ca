//! Scout - 结构化调研流水线入口
//!
//! 初始化日志与配置，循环读取查询：每条查询跑一次
//! Search → Extract → Research → Recommend 流水线并渲染报告。
//! 退出指令结束会话；单条查询失败打印 Error 后继续。

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scout::config::load_config;
use scout::llm::create_llm_from_config;
use scout::message::is_exit_command;
use scout::report::render_report;
use scout::search::FirecrawlClient;
use scout::workflow::ResearchPipeline;

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
    let pipeline = ResearchPipeline::new(llm, search, cfg.workflow.clone());

    println!("Product Research Agent");

    let stdin = io::stdin();
    loop {
        print!("\nQuery: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("Read stdin")? == 0 {
            break; // EOF
        }
        let query = line.trim();

        if is_exit_command(query) {
            println!("Bye!");
            break;
        }
        if query.is_empty() {
            continue;
        }

        match pipeline.run(query).await {
            Ok(result) => print!("{}", render_report(&result)),
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}
