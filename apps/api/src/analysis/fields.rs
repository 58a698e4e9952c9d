/// Placeholder for a field the model's reply did not contain.
pub const NOT_AVAILABLE: &str = "Not Available";
/// Placeholder for every field of a document that could not be analyzed.
pub const ERROR: &str = "Error";

/// The thirteen fields scraped from every résumé, in report column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResumeField {
    Name,
    ContactDetails,
    University,
    YearOfStudy,
    Course,
    Discipline,
    CgpaPercentage,
    KeySkills,
    AiMlExperienceScore,
    GenerativeAiExperienceScore,
    SuggestedCareerRole,
    SupportingInformation,
    PredictIndustryFit,
}

impl ResumeField {
    pub const ALL: [ResumeField; 13] = [
        ResumeField::Name,
        ResumeField::ContactDetails,
        ResumeField::University,
        ResumeField::YearOfStudy,
        ResumeField::Course,
        ResumeField::Discipline,
        ResumeField::CgpaPercentage,
        ResumeField::KeySkills,
        ResumeField::AiMlExperienceScore,
        ResumeField::GenerativeAiExperienceScore,
        ResumeField::SuggestedCareerRole,
        ResumeField::SupportingInformation,
        ResumeField::PredictIndustryFit,
    ];

    /// Column header, JSON key, and the label the model is asked to emit.
    pub fn label(self) -> &'static str {
        match self {
            ResumeField::Name => "Name",
            ResumeField::ContactDetails => "Contact Details",
            ResumeField::University => "University",
            ResumeField::YearOfStudy => "Year of Study",
            ResumeField::Course => "Course",
            ResumeField::Discipline => "Discipline",
            ResumeField::CgpaPercentage => "CGPA/Percentage",
            ResumeField::KeySkills => "Key Skills",
            ResumeField::AiMlExperienceScore => "AI/ML Experience Score",
            ResumeField::GenerativeAiExperienceScore => "Generative AI Experience Score",
            ResumeField::SuggestedCareerRole => "Suggested Career Role",
            ResumeField::SupportingInformation => "Supporting Information",
            ResumeField::PredictIndustryFit => "Predict Industry Fit",
        }
    }

    /// Extra guidance shown to the model after the label in the prompt.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            ResumeField::AiMlExperienceScore | ResumeField::GenerativeAiExperienceScore => {
                Some("1-3 scale")
            }
            ResumeField::SupportingInformation => {
                Some("e.g., certifications, internships, projects")
            }
            ResumeField::PredictIndustryFit => Some("Tech, Healthcare, Finance, etc."),
            ResumeField::KeySkills => Some("comma-separated"),
            _ => None,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// True for the two placeholder values.
pub fn is_sentinel(value: &str) -> bool {
    value == NOT_AVAILABLE || value == ERROR
}
