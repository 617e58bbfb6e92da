//! Clients for the third-party services the server talks to

pub mod llm;
pub mod payment;
pub mod pdf;

pub use llm::{AdvisorError, LanguageModel, OpenAiClient};
pub use payment::{GatewayError, PaymentGateway, PaymentIntent, StripeGateway};
pub use pdf::ReportError;
