use serde::Deserialize;

const DEFAULT_LEGAL_NOTICE: &str = "This document contains proprietary, privileged, and confidential \
information belonging to Project X Holdings. It is provided solely for the designated recipients \
and must not be copied, distributed, or disclosed to any third party without prior written consent. \
By accepting this document you agree to maintain its confidentiality and to use the information \
only for the purpose for which it was provided.";

/// Branding and metadata printed on the cover page and on every page's
/// running header and footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branding {
    pub project_name: String,
    pub cover_subtitle: String,
    pub prepared_for: String,
    pub prepared_by: String,
    pub classification: String,
    pub header_title: String,
    /// strftime-style format for the header and cover dates.
    pub header_date_format: String,
    pub confidentiality_notice: String,
    /// Interpolates `{year}` and `{project}`.
    pub rights_notice_template: String,
    pub legal_notice: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            project_name: "Project-X".to_string(),
            cover_subtitle: "Corporate Strategy & Intelligence Dossier".to_string(),
            prepared_for: "Project-X Executive Leadership Team".to_string(),
            prepared_by: "Strategy & Compliance Office".to_string(),
            classification: "Strictly Confidential – Do Not Distribute".to_string(),
            header_title: "Project X — Strategic Overview".to_string(),
            header_date_format: "%B %d, %Y".to_string(),
            confidentiality_notice: "Confidential – Attorney-Client Privileged & Proprietary"
                .to_string(),
            rights_notice_template: "© {year} {project} - Innovista. All rights reserved."
                .to_string(),
            legal_notice: DEFAULT_LEGAL_NOTICE.to_string(),
        }
    }
}

impl Branding {
    /// Default branding retitled for a document set, e.g. `"About"`.
    pub fn for_title(title: &str) -> Self {
        Self {
            project_name: title.to_string(),
            header_title: format!("{title} — Strategic Overview"),
            ..Self::default()
        }
    }

    /// Renders the rights notice for the given build year.
    pub fn rights_notice(&self, year: i32) -> String {
        self.rights_notice_template
            .replace("{year}", &year.to_string())
            .replace("{project}", &self.project_name)
    }
}

/// Branding fields as they appear in the config file; every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BrandingOverrides {
    pub project_name: Option<String>,
    pub cover_subtitle: Option<String>,
    pub prepared_for: Option<String>,
    pub prepared_by: Option<String>,
    pub classification: Option<String>,
    pub header_title: Option<String>,
    pub header_date_format: Option<String>,
    pub confidentiality_notice: Option<String>,
    pub rights_notice_template: Option<String>,
    pub legal_notice: Option<String>,
}

impl BrandingOverrides {
    /// Resolves the overrides against defaults titled after `derived_title`.
    ///
    /// A configured project name replaces the derived title; the header title
    /// follows the project name unless it is configured itself.
    pub fn resolve(&self, derived_title: &str) -> Branding {
        let title = self.project_name.as_deref().unwrap_or(derived_title);
        let base = Branding::for_title(title);

        Branding {
            project_name: base.project_name,
            cover_subtitle: pick(&self.cover_subtitle, base.cover_subtitle),
            prepared_for: pick(&self.prepared_for, base.prepared_for),
            prepared_by: pick(&self.prepared_by, base.prepared_by),
            classification: pick(&self.classification, base.classification),
            header_title: pick(&self.header_title, base.header_title),
            header_date_format: pick(&self.header_date_format, base.header_date_format),
            confidentiality_notice: pick(&self.confidentiality_notice, base.confidentiality_notice),
            rights_notice_template: pick(&self.rights_notice_template, base.rights_notice_template),
            legal_notice: pick(&self.legal_notice, base.legal_notice),
        }
    }
}

fn pick(value: &Option<String>, fallback: String) -> String {
    value.clone().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn rights_notice_interpolates_year_and_project() {
        let branding = Branding::default();
        assert_eq!(
            branding.rights_notice(2026),
            "© 2026 Project-X - Innovista. All rights reserved."
        );
    }

    #[test]
    fn for_title_retitles_header() {
        let branding = Branding::for_title("About");
        assert_eq!(branding.project_name, "About");
        assert_eq!(branding.header_title, "About — Strategic Overview");
        assert_eq!(branding.prepared_by, Branding::default().prepared_by);
    }

    #[test]
    fn empty_overrides_resolve_to_derived_title() {
        let branding = BrandingOverrides::default().resolve("Systems");
        assert_eq!(branding, Branding::for_title("Systems"));
    }

    #[test]
    fn configured_project_name_wins_over_derived_title() {
        let overrides = BrandingOverrides {
            project_name: Some("Atlas".to_string()),
            classification: Some("Internal".to_string()),
            ..BrandingOverrides::default()
        };

        let branding = overrides.resolve("Systems");

        assert_eq!(branding.project_name, "Atlas");
        assert_eq!(branding.header_title, "Atlas — Strategic Overview");
        assert_eq!(branding.classification, "Internal");
    }

    #[test]
    fn configured_header_title_is_kept() {
        let overrides = BrandingOverrides {
            header_title: Some("Quarterly Pack".to_string()),
            ..BrandingOverrides::default()
        };

        assert_eq!(overrides.resolve("About").header_title, "Quarterly Pack");
    }
}
