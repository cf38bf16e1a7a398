use std::sync::mpsc::Sender;

/// Summary of one evaluated generation (or grid batch)
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub generation: usize,
    pub evaluated: usize,
    pub failed: usize,
    /// Best cost within this generation, if any candidate succeeded
    pub generation_best: Option<f64>,
    /// Best cost held by the selector
    pub overall_best: Option<f64>,
    pub selector_size: usize,
}

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, report: &GenerationReport);
}

/// Ignores all progress
pub struct SilentProgress;

impl ProgressCallback for SilentProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _report: &GenerationReport) {}
}

/// Reports progress through the `log` facade
pub struct LogProgressCallback;

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::info!("Generation {} starting...", generation + 1);
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        log::info!(
            "Generation {} complete. Evaluated: {}, failed: {}, best: {}, overall best: {}, selector size: {}",
            report.generation + 1,
            report.evaluated,
            report.failed,
            format_cost(report.generation_best),
            format_cost(report.overall_best),
            report.selector_size
        );
    }
}

fn format_cost(cost: Option<f64>) -> String {
    cost.map(|c| format!("{:.4}", c))
        .unwrap_or_else(|| "-".to_string())
}

pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete(GenerationReport),
}

/// Forwards progress to another thread, e.g. a host application
pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, report: &GenerationReport) {
        let _ = self
            .sender
            .send(ProgressMessage::GenerationComplete(report.clone()));
    }
}
