use bytes::Bytes;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME types a resume may be uploaded as.
pub const ACCEPTED_RESUME_MIME_TYPES: &[&str] = &[PDF_MIME, DOCX_MIME];

/// Multipart part name carrying the resume file.
pub const RESUME_PART: &str = "resume";

/// The text fields of the sign-up form, in the order the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    HighestQualification,
    DesiredJobRole,
    Experience,
    ExpectedCtc,
    Address,
    GithubProfile,
    LinkedinProfile,
    PortfolioWebsite,
    CoverLetter,
}

impl FormField {
    pub const ALL: [FormField; 12] = [
        FormField::Name,
        FormField::Email,
        FormField::Phone,
        FormField::HighestQualification,
        FormField::DesiredJobRole,
        FormField::Experience,
        FormField::ExpectedCtc,
        FormField::Address,
        FormField::GithubProfile,
        FormField::LinkedinProfile,
        FormField::PortfolioWebsite,
        FormField::CoverLetter,
    ];

    /// Name used for the field in HTML forms and multipart bodies.
    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::HighestQualification => "highestQualification",
            FormField::DesiredJobRole => "desiredJobRole",
            FormField::Experience => "experience",
            FormField::ExpectedCtc => "expectedCTC",
            FormField::Address => "address",
            FormField::GithubProfile => "githubProfile",
            FormField::LinkedinProfile => "linkedinProfile",
            FormField::PortfolioWebsite => "portfolioWebsite",
            FormField::CoverLetter => "coverLetter",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.wire_name() == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualification {
    HighSchool,
    Diploma,
    Bachelors,
    Masters,
    PhD,
}

impl Qualification {
    pub const ALL: [Qualification; 5] = [
        Qualification::HighSchool,
        Qualification::Diploma,
        Qualification::Bachelors,
        Qualification::Masters,
        Qualification::PhD,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Qualification::HighSchool => "High School",
            Qualification::Diploma => "Diploma",
            Qualification::Bachelors => "Bachelors",
            Qualification::Masters => "Masters",
            Qualification::PhD => "PhD",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.label() == label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobRole {
    SoftwareDeveloper,
    DataScientist,
    ProjectManager,
    UiUxDesigner,
}

impl JobRole {
    pub const ALL: [JobRole; 4] = [
        JobRole::SoftwareDeveloper,
        JobRole::DataScientist,
        JobRole::ProjectManager,
        JobRole::UiUxDesigner,
    ];

    pub fn label(self) -> &'static str {
        match self {
            JobRole::SoftwareDeveloper => "Software Developer",
            JobRole::DataScientist => "Data Scientist",
            JobRole::ProjectManager => "Project Manager",
            JobRole::UiUxDesigner => "UI/UX Designer",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// A file picked in the resume input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Bytes,
}

impl ResumeFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn has_accepted_type(&self) -> bool {
        ACCEPTED_RESUME_MIME_TYPES.contains(&self.content_type.as_str())
    }
}

/// One candidate's form entries plus the attached resume, assembled fresh
/// for every submit attempt. Values are exactly what the form holds; nothing
/// here has been checked yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplicationSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub highest_qualification: String,
    pub desired_job_role: String,
    pub experience: String,
    pub expected_ctc: String,
    pub address: String,
    pub github_profile: String,
    pub linkedin_profile: String,
    pub portfolio_website: String,
    pub cover_letter: String,
    pub resume: Option<ResumeFile>,
}

impl ApplicationSubmission {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Phone => &self.phone,
            FormField::HighestQualification => &self.highest_qualification,
            FormField::DesiredJobRole => &self.desired_job_role,
            FormField::Experience => &self.experience,
            FormField::ExpectedCtc => &self.expected_ctc,
            FormField::Address => &self.address,
            FormField::GithubProfile => &self.github_profile,
            FormField::LinkedinProfile => &self.linkedin_profile,
            FormField::PortfolioWebsite => &self.portfolio_website,
            FormField::CoverLetter => &self.cover_letter,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Phone => &mut self.phone,
            FormField::HighestQualification => &mut self.highest_qualification,
            FormField::DesiredJobRole => &mut self.desired_job_role,
            FormField::Experience => &mut self.experience,
            FormField::ExpectedCtc => &mut self.expected_ctc,
            FormField::Address => &mut self.address,
            FormField::GithubProfile => &mut self.github_profile,
            FormField::LinkedinProfile => &mut self.linkedin_profile,
            FormField::PortfolioWebsite => &mut self.portfolio_website,
            FormField::CoverLetter => &mut self.cover_letter,
        }
    }
}

/// A submission that passed every validation rule. Only the validator
/// constructs one, so the submission client never sees unchecked input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSubmission {
    pub(super) fields: ApplicationSubmission,
    pub(super) qualification: Qualification,
    pub(super) job_role: JobRole,
    pub(super) resume: ResumeFile,
}

impl ValidatedSubmission {
    pub fn qualification(&self) -> Qualification {
        self.qualification
    }

    pub fn job_role(&self) -> JobRole {
        self.job_role
    }

    pub fn resume(&self) -> &ResumeFile {
        &self.resume
    }

    /// Every text part of the multipart body as `(wire name, value)`, in form
    /// order. Optional fields are included even when empty.
    pub fn text_parts(&self) -> Vec<(&'static str, String)> {
        FormField::ALL
            .into_iter()
            .map(|field| {
                let value = match field {
                    FormField::HighestQualification => self.qualification.label().to_string(),
                    FormField::DesiredJobRole => self.job_role.label().to_string(),
                    other => self.fields.field(other).to_string(),
                };
                (field.wire_name(), value)
            })
            .collect()
    }
}
