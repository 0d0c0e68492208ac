//! # blog-service
//!
//! Application layer containing business logic, services, DTOs, and the mailer port.

pub mod dto;
pub mod mail;
pub mod services;

pub use mail::{LogMailer, MailError, Mailer, RecordingMailer, SentMail};
pub use services::{ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult};
