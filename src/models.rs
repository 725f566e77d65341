use serde::Serialize;
use thiserror::Error;
use url::Url;

/// One pinned dependency from the manifest.
///
/// Candidate license URLs are derived on demand from `repository_url`; nothing
/// about them is cached on the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyDescriptor {
    pub name: String,
    pub repository_url: Url,
}

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("repository url `{0}` cannot carry a path")]
    NotHierarchical(Url),
}

impl DependencyDescriptor {
    pub fn new(name: impl Into<String>, repository_url: Url) -> Result<Self, DescriptorError> {
        if repository_url.cannot_be_a_base() {
            return Err(DescriptorError::NotHierarchical(repository_url));
        }
        Ok(Self {
            name: name.into(),
            repository_url,
        })
    }

    /// Repository URL with any trailing `.git` removed.
    pub fn license_base(&self) -> Url {
        strip_git_extension(&self.repository_url)
    }

    pub fn master_url(&self) -> Url {
        self.raw_file_url("master", "LICENSE")
    }

    pub fn main_url(&self) -> Url {
        self.raw_file_url("main", "LICENSE")
    }

    pub fn master_markdown_url(&self) -> Url {
        self.raw_file_url("master", "LICENSE.md")
    }

    pub fn main_markdown_url(&self) -> Url {
        self.raw_file_url("main", "LICENSE.md")
    }

    /// Probe order: `master` before `main`, bare `LICENSE` before `LICENSE.md`.
    pub fn candidate_license_urls(&self) -> [Url; 4] {
        [
            self.master_url(),
            self.main_url(),
            self.master_markdown_url(),
            self.main_markdown_url(),
        ]
    }

    fn raw_file_url(&self, branch: &str, file: &str) -> Url {
        let mut url = self.license_base();
        // `new` rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(["raw", branch, file]);
        }
        url
    }
}

/// Remove a trailing `.git` from a repository URL such as
/// `https://github.com/owner/repo.git`.
///
/// Only an exact trailing `.git` is removed; `.git` elsewhere in the path is
/// left alone. Repeated suffixes are all removed, so applying this twice gives
/// the same result as applying it once. If what is left no longer parses as a
/// URL the input is returned unchanged.
pub fn strip_git_extension(url: &Url) -> Url {
    let mut stripped = url.as_str();
    while let Some(rest) = stripped.strip_suffix(".git") {
        stripped = rest;
    }
    if stripped.len() == url.as_str().len() {
        return url.clone();
    }
    match Url::parse(stripped) {
        Ok(parsed) if !parsed.cannot_be_a_base() => parsed,
        _ => url.clone(),
    }
}

/// License text retrieved from one candidate URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub source_url: Url,
    pub text: String,
}

/// Outcome of resolving one dependency; `license` is `None` when every
/// candidate missed.
#[derive(Debug, Clone, Serialize)]
pub struct LicenseReport {
    pub name: String,
    pub repository_url: Url,
    pub license: Option<License>,
}

impl LicenseReport {
    pub fn new(descriptor: &DependencyDescriptor, license: Option<License>) -> Self {
        Self {
            name: descriptor.name.clone(),
            repository_url: descriptor.repository_url.clone(),
            license,
        }
    }
}
