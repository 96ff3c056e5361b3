pub mod insights_provider;
pub mod mixpanel;
