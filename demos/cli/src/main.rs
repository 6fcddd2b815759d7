mod render;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use triage_client::{AnalysisOrchestrator, ClientConfig, HttpBackend};
use triage_core::{TriageConfig, TriageReport};
use triage_payload::build_report_str;

#[derive(Parser, Debug)]
#[command(
    name = "triage",
    about = "Tạo báo cáo phân loại từ kết quả phân tích triệu chứng."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dựng báo cáo từ file JSON payload có sẵn.
    Render {
        /// Đường dẫn tới file JSON payload.
        #[arg(short, long)]
        input: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Gửi triệu chứng tới backend và in báo cáo.
    Analyze {
        /// Mô tả triệu chứng; bỏ trống để đọc từ stdin.
        #[arg(short, long)]
        symptoms: Option<String>,
        #[command(flatten)]
        backend: BackendArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Kiểm tra trạng thái backend.
    Health {
        #[command(flatten)]
        backend: BackendArgs,
    },
}

#[derive(clap::Args, Debug)]
struct BackendArgs {
    /// Địa chỉ backend (mặc định lấy từ TRIAGE_API_URL).
    #[arg(long)]
    url: Option<String>,
    /// Timeout tính bằng giây (mặc định lấy từ TRIAGE_API_TIMEOUT).
    #[arg(long)]
    timeout: Option<u64>,
}

impl BackendArgs {
    fn resolve(&self) -> anyhow::Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("Không đọc được cấu hình backend")?;
        if let Some(url) = &self.url {
            config.base_url = url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        Ok(config)
    }
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// In báo cáo dạng JSON.
    #[arg(long)]
    json: bool,
    /// Số đoạn khuyến nghị trên bảng tóm tắt.
    #[arg(long, default_value_t = TriageConfig::default().recommendation_preview)]
    recommendation_preview: usize,
    /// Số nguồn tham khảo trên bảng tóm tắt.
    #[arg(long, default_value_t = TriageConfig::default().source_preview)]
    source_preview: usize,
}

impl OutputArgs {
    fn config(&self) -> TriageConfig {
        TriageConfig {
            recommendation_preview: self.recommendation_preview,
            source_preview: self.source_preview,
        }
    }

    fn emit(&self, report: &TriageReport) -> anyhow::Result<()> {
        if self.json {
            let text =
                serde_json::to_string_pretty(report).context("Không serialize được báo cáo")?;
            println!("{text}");
        } else {
            let text = render::render_report(report).context("Không trình bày được báo cáo")?;
            print!("{text}");
        }
        Ok(())
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("triage=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    match args.command {
        Command::Render { input, output } => {
            let data = std::fs::read_to_string(&input)
                .with_context(|| format!("Không đọc được file {:?}", input))?;
            let report = build_report_str(&data, &output.config())?;
            output.emit(&report)
        }
        Command::Analyze {
            symptoms,
            backend,
            output,
        } => {
            let symptoms = match symptoms {
                Some(text) => text,
                None => read_stdin()?,
            };
            let config = backend.resolve()?;
            tracing::info!(url = %config.base_url, "using analysis backend");

            let mut orchestrator = AnalysisOrchestrator::new(HttpBackend::new(&config)?);
            let state = orchestrator.submit(&symptoms)?;
            if let Some(message) = state.failure_message() {
                bail!("{message}");
            }

            match orchestrator.report(&output.config())? {
                Some(report) => output.emit(&report),
                None => bail!("Backend không trả về kết quả"),
            }
        }
        Command::Health { backend } => {
            let config = backend.resolve()?;
            let orchestrator = AnalysisOrchestrator::new(HttpBackend::new(&config)?);
            let health = orchestrator
                .health()
                .with_context(|| format!("Không kiểm tra được {}", config.base_url))?;
            println!(
                "Status: {}\nModel: {}\nAPI configured: {}",
                health.status,
                health.model.as_deref().unwrap_or("--"),
                health.api_configured
            );
            Ok(())
        }
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Không đọc được stdin")?;
    Ok(buffer)
}
