use portfolio_core_contact_impl::ContactServiceImpl;
use portfolio_core_health_impl::HealthServiceImpl;
use portfolio_email_impl::EmailServiceImpl;
use portfolio_shared_impl::time::TimeServiceImpl;
use portfolio_templates_impl::TemplateServiceImpl;

pub type RestServer = portfolio_api_rest::RestServer<Health, Contact>;

// Shared
pub type Time = TimeServiceImpl;
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;

// Core
pub type Contact = ContactServiceImpl<Time, Email, Template>;
pub type Health = HealthServiceImpl<Time, Email>;
