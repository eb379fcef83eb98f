use std::sync::Arc;

use color_eyre::Result;
use openalaw_agent::CoreAgent;
use openalaw_bridge::StubBridge;
use openalaw_core::agent::{ExecutionTarget, TaskAgent};
use openalaw_orchestrator::{detect::SystemRules, Orchestrator, TaskOutcome};
use serde::Serialize;
use tracing::info;

use crate::config::Config;

/// Task processed when the binary runs without a subcommand.
pub const DEMO_TASK: &str = "Analyze this input";

/// Wire a fresh agent and stub bridge into an orchestrator (not yet initialized).
pub fn build_orchestrator(config: &Config) -> Result<Orchestrator> {
    let agent = CoreAgent::new(config.agent_config()?);
    let bridge = StubBridge::new();
    Ok(Orchestrator::new(Arc::new(agent), Arc::new(bridge)).with_rules(config.system_rules()))
}

async fn ready_orchestrator(config: &Config) -> Result<Orchestrator> {
    let orchestrator = build_orchestrator(config)?;
    orchestrator
        .initialize()
        .await
        .map_err(|e| color_eyre::eyre::eyre!(e.to_string()))?;
    Ok(orchestrator)
}

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
    println!("{label}: {}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Initialize, process the demo task, print the result and status.
pub async fn demo(config: &Config) -> Result<()> {
    let orchestrator = ready_orchestrator(config).await?;
    let agent_id = orchestrator.status().agent_id;
    println!("Starting OpenALaw ({agent_id})...");

    println!("\nExample: processing a simple task...");
    let outcome = orchestrator.process_task(DEMO_TASK).await?;
    print_json("Result", &outcome)?;
    print_json("\nStatus", &orchestrator.status())?;
    println!("\nOpenALaw system ready for tasks!");
    Ok(())
}

pub async fn task(task: String, config: &Config) -> Result<TaskOutcome> {
    let orchestrator = ready_orchestrator(config).await?;
    let outcome = orchestrator.process_task(&task).await?;
    match &outcome {
        TaskOutcome::Core(core) => println!("{core}"),
        combined => print_json("Result", combined)?,
    }
    Ok(outcome)
}

/// How a task would be handled, computed without initializing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub target: ExecutionTarget,
    pub system_interaction: bool,
}

pub fn classify(task: &str, config: &Config) -> Result<Classification> {
    let agent = CoreAgent::new(config.agent_config()?);
    let rules: SystemRules = config.system_rules();
    let classification = Classification {
        target: agent.classify(task),
        system_interaction: rules.requires_system_interaction(task),
    };
    println!(
        "target: {}\nsystem interaction: {}",
        classification.target, classification.system_interaction
    );
    Ok(classification)
}

/// Enqueue every task, then drain the queue. Returns how many were drained.
pub async fn queue(tasks: Vec<String>, config: &Config) -> Result<usize> {
    let orchestrator = ready_orchestrator(config).await?;
    let agent = orchestrator.agent();
    for task in tasks {
        agent.enqueue(task).await?;
    }
    let drained = agent.process_queue().await?;
    info!(drained, "queue drained");
    println!("Processed {drained} queued task(s).");
    Ok(drained)
}

pub async fn status(config: &Config) -> Result<()> {
    let orchestrator = ready_orchestrator(config).await?;
    println!("{}", serde_json::to_string_pretty(&orchestrator.status())?);
    Ok(())
}
