//! Landing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;
use tracing::instrument;

use project_germany_core::Interest;

use crate::filters;

/// One card in the services grid.
#[derive(Debug, Clone, Copy)]
pub struct ServiceCard {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Services shown on the landing page, in display order.
pub const SERVICES: [ServiceCard; 6] = [
    ServiceCard {
        icon: "🎓",
        title: "University Selection",
        description: "Find the perfect public university that matches your academic goals and profile.",
    },
    ServiceCard {
        icon: "📝",
        title: "Application Assistance",
        description: "Step-by-step guidance through uni-assist, direct applications and document preparation.",
    },
    ServiceCard {
        icon: "🛂",
        title: "Visa Support",
        description: "Help with blocked accounts, health insurance and your student visa appointment.",
    },
    ServiceCard {
        icon: "🏠",
        title: "Accommodation",
        description: "Tips and contacts for student dorms, shared flats and your first registration (Anmeldung).",
    },
    ServiceCard {
        icon: "🗣️",
        title: "Language Courses",
        description: "Guidance on German and English language certificates and preparation courses.",
    },
    ServiceCard {
        icon: "💼",
        title: "Career Guidance",
        description: "Advice on part-time jobs, internships and staying in Germany after graduation.",
    },
];

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub services: &'static [ServiceCard],
    pub interests: &'static [Interest],
}

/// Display the landing page.
#[instrument]
pub async fn index() -> impl IntoResponse {
    HomeTemplate {
        services: &SERVICES,
        interests: &Interest::ALL,
    }
}
