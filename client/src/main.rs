use anyhow::Context;
use chrono::Utc;
use chrono_humanize::HumanTime;
use foxhole_war::warapi::{Map, Report};
use foxhole_war::{Config, WarApiClient};
use futures_util::future::join_all;
use std::borrow::Cow;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() {
    // 로깅 초기화: 콘솔 + 일별 로테이션 파일
    let file_appender = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix("foxhole-war")
        .filename_suffix("log")
        .build("logs")
        .expect("initializing rolling file appender failed");

    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr.and(non_blocking))
        .with_ansi(true)
        .init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = if args.is_empty() {
        Cow::from("./config.toml")
    } else {
        Cow::from(args.remove(0))
    };

    let config = match get_config(&*config_path).await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Failed to load config, using defaults: {:#}", e);
            Config::default()
        }
    };

    if let Err(e) = run(&config).await {
        tracing::error!("War API error: {}", e);
        tracing::error!("  {:?}", e);
    }
}

async fn run(config: &Config) -> anyhow::Result<()> {
    let Some((&first, rest)) = config.servers.split_first() else {
        anyhow::bail!("no servers configured");
    };

    // 모든 서버가 연결 풀과 캐시를 공유
    let base = WarApiClient::with_options(first, config.client_options());
    let clients = std::iter::once(base.clone())
        .chain(rest.iter().map(|&server| base.for_server(server)));

    for client in clients {
        println!("@{}", client.base_url());

        let maps = client
            .fetch_map_list()
            .await
            .with_context(|| format!("could not fetch map list from {}", client.base_url()))?;

        let reports = join_all(maps.iter().map(|map| client.fetch_report(&map.raw_name))).await;
        for (map, report) in maps.iter().zip(reports) {
            let report = match report {
                Ok(report) => Some(report),
                Err(e) => {
                    tracing::warn!(map = %map.raw_name, "could not fetch war report: {}", e);
                    None
                }
            };
            print_map(map, report.as_ref());
        }

        let war = client
            .fetch_current_war()
            .await
            .context("could not fetch current war")?;

        let started = war
            .conquest_start()
            .map(|start| HumanTime::from(start - Utc::now()).to_string())
            .unwrap_or_else(|| "not started".to_owned());
        println!(
            "war #{} ({}) started {}, winner: {}, victory towns required: {}",
            war.war_number, war.war_id, started, war.winner, war.required_victory_towns
        );
        println!();
    }

    Ok(())
}

fn print_map(map: &Map, report: Option<&Report>) {
    println!(
        "{} ({}) region {}: {} items, {} labels, {} scorched victory towns",
        map.pretty_name,
        map.raw_name,
        map.region_id,
        map.map_items.len(),
        map.map_text_items.len(),
        map.scorched_victory_towns
    );

    if let Some(report) = report {
        println!(
            "  day {}: {} enlisted, {} colonial / {} warden casualties",
            report.day_of_war,
            report.total_enlistments,
            report.colonial_casualties,
            report.warden_casualties
        );
    }
}

async fn get_config<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
    let mut f = File::open(path)
        .await
        .context("could not open config file")?;
    let mut toml = String::new();
    f.read_to_string(&mut toml)
        .await
        .context("could not read config file")?;
    let config = toml::from_str(&toml).context("could not parse config file")?;

    Ok(config)
}
