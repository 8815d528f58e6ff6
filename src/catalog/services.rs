//! Services catalog shown on the services page.

/// Pricing tier of a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTier {
    /// Entry-level, one-off work
    Starter,
    /// Ongoing production support
    Pro,
    /// Full-channel management
    Premium,
}

impl ServiceTier {
    /// Badge label for the tier.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceTier::Starter => "Starter",
            ServiceTier::Pro => "Pro",
            ServiceTier::Premium => "Premium",
        }
    }
}

/// A service offered to creators.
#[derive(Debug, Clone)]
pub struct Service {
    /// Service name
    pub name: String,
    /// One-paragraph description
    pub description: String,
    /// Pricing tier
    pub tier: ServiceTier,
    /// Human-readable price line
    pub price_label: String,
}

impl Service {
    /// Create a new service entry.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        tier: ServiceTier,
        price_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            tier,
            price_label: price_label.into(),
        }
    }
}

/// The services catalog.
pub struct ServiceCatalog {
    services: Vec<Service>,
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl ServiceCatalog {
    /// Create the catalog with the default offerings.
    pub fn new() -> Self {
        let services = vec![
            Service::new(
                "Thumbnail Design",
                "Custom thumbnails designed around your channel's style, delivered \
                 within 48 hours with two revision rounds.",
                ServiceTier::Starter,
                "from $25 per thumbnail",
            ),
            Service::new(
                "Video Editing",
                "Full edit of your raw footage: cuts, pacing, captions, sound \
                 design and platform-ready export.",
                ServiceTier::Pro,
                "from $150 per video",
            ),
            Service::new(
                "Channel Audit",
                "A deep review of your content, packaging and analytics with a \
                 written action plan for the next 90 days.",
                ServiceTier::Starter,
                "$99 one-time",
            ),
            Service::new(
                "SEO & Packaging",
                "Titles, descriptions, tags and end screens optimized per upload \
                 to lift impressions and click-through rate.",
                ServiceTier::Pro,
                "from $200/mo",
            ),
            Service::new(
                "Growth Coaching",
                "Bi-weekly one-on-one strategy calls with a growth coach who has \
                 scaled channels in your niche.",
                ServiceTier::Premium,
                "from $400/mo",
            ),
            Service::new(
                "Full Channel Management",
                "End-to-end production: ideation, editing, packaging, scheduling \
                 and community management, so you only film.",
                ServiceTier::Premium,
                "custom pricing",
            ),
        ];

        Self { services }
    }

    /// All services in display order.
    pub fn all(&self) -> &[Service] {
        &self.services
    }

    /// Services in one tier, preserving display order.
    pub fn by_tier(&self, tier: ServiceTier) -> Vec<&Service> {
        self.services.iter().filter(|s| s.tier == tier).collect()
    }

    /// Look up a service by name, case-insensitive.
    pub fn get(&self, name: &str) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }
}
