/// Wizard step definitions
///
/// Defines the steps of the order intake flow.

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WizardStep {
    /// Serial entry - Type one or more serial numbers
    #[default]
    CollectSerials,

    /// Review - Show the catalog result for every serial number
    ReviewVerification,

    /// Shipping - Collect the shipping address and submit the order
    CollectShipping,

    /// Complete - Order handed off
    Complete,
}

impl WizardStep {
    /// Get step title
    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::CollectSerials => "Enter Serial Numbers",
            WizardStep::ReviewVerification => "Verify Products",
            WizardStep::CollectShipping => "Shipping Information",
            WizardStep::Complete => "Order Submitted",
        }
    }

    /// Get step description
    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::CollectSerials => "Enter the serial number of every product in the format XX-XXXXXX",
            WizardStep::ReviewVerification => "Check the products found for your serial numbers",
            WizardStep::CollectShipping => "Tell us where to ship your order",
            WizardStep::Complete => "Thank you! Your order has been submitted.",
        }
    }

    /// Get step number (1-indexed)
    pub fn number(&self) -> usize {
        match self {
            WizardStep::CollectSerials => 1,
            WizardStep::ReviewVerification => 2,
            WizardStep::CollectShipping => 3,
            WizardStep::Complete => 4,
        }
    }

    /// Number of form steps the user fills in (excludes `Complete`)
    pub fn total_steps() -> usize {
        3
    }

    /// Check if this is the first step
    pub fn is_first(&self) -> bool {
        matches!(self, WizardStep::CollectSerials)
    }

    /// Check if this is the last step
    pub fn is_last(&self) -> bool {
        matches!(self, WizardStep::Complete)
    }

    /// Get next step
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CollectSerials => Some(WizardStep::ReviewVerification),
            WizardStep::ReviewVerification => Some(WizardStep::CollectShipping),
            WizardStep::CollectShipping => Some(WizardStep::Complete),
            WizardStep::Complete => None,
        }
    }

    /// Get previous step. Nothing leads back out of `Complete`.
    pub fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::CollectSerials => None,
            WizardStep::ReviewVerification => Some(WizardStep::CollectSerials),
            WizardStep::CollectShipping => Some(WizardStep::ReviewVerification),
            WizardStep::Complete => None,
        }
    }

    /// Get all steps in order
    pub fn all_steps() -> Vec<WizardStep> {
        vec![
            WizardStep::CollectSerials,
            WizardStep::ReviewVerification,
            WizardStep::CollectShipping,
            WizardStep::Complete,
        ]
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}
