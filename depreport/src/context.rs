/// Accumulates what each stage produced during one run.
#[derive(Debug, Default)]
pub struct ReportContext {
    pub sections: Vec<Section>,
    pub signals: Signals,
    /// Step outputs in the order stages recorded them.
    pub outputs: Vec<(String, String)>,
}

#[derive(Debug, Clone)]
pub struct Section {
    pub stage: &'static str,
    pub markdown: String,
}

/// Numbers the gates decide on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Signals {
    pub total_dependencies: u64,
    pub vulnerability_count: u64,
    pub outdated_count: u64,
}

impl ReportContext {
    pub fn push_section(&mut self, stage: &'static str, markdown: String) {
        self.sections.push(Section { stage, markdown });
    }

    pub fn set_output(&mut self, name: &str, value: impl ToString) {
        let value = value.to_string();
        match self.outputs.iter_mut().find(|(n, _)| n == name) {
            Some(existing) => existing.1 = value,
            None => self.outputs.push((name.to_string(), value)),
        }
    }

    /// Section fragments joined in stage order.
    pub fn body(&self) -> String {
        self.sections.iter().map(|s| s.markdown.as_str()).collect()
    }
}
