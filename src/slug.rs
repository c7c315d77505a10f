// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Stable identifiers for rendered cards.
//!
//! Card slugs double as output file stems, so they only contain ASCII
//! alphanumerics, `-`, `_` and `.`. Repository pins keep the repository's own
//! casing so `FaceAutoVN` stays recognisable; generic slugs are lowercased.

/// Builder for card slugs.
#[derive(Debug, Clone, Copy)]
pub struct SlugStrategy<'input> {
    source:        &'input str,
    preserve_case: bool,
    variant:       Option<&'input str>
}

impl<'input> SlugStrategy<'input> {
    /// Creates a builder for `source`.
    pub fn builder(source: &'input str) -> Self {
        Self {
            source,
            preserve_case: false,
            variant: None
        }
    }

    /// Keeps the original letter casing.
    #[must_use]
    pub fn preserve_case(mut self, preserve: bool) -> Self {
        self.preserve_case = preserve;
        self
    }

    /// Appends `.{variant}` to the slug, e.g. `dark` or `light`.
    #[must_use]
    pub fn variant(mut self, variant: &'input str) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Builds the slug.
    ///
    /// Disallowed characters collapse into single hyphens and leading or
    /// trailing separators are dropped. Returns `None` when nothing usable
    /// remains.
    ///
    /// # Examples
    ///
    /// ```
    /// use readme_cards::SlugStrategy;
    ///
    /// let slug = SlugStrategy::builder("octocat/Hello World").preserve_case(true).variant("dark").build();
    /// assert_eq!(slug.as_deref(), Some("octocat-Hello-World.dark"));
    /// assert_eq!(SlugStrategy::builder(" Top Langs ").build().as_deref(), Some("top-langs"));
    /// ```
    pub fn build(self) -> Option<String> {
        let mut slug = normalize(self.source, self.preserve_case)?;
        if let Some(variant) = self.variant.and_then(|variant| normalize(variant, false)) {
            slug.push('.');
            slug.push_str(&variant);
        }
        Some(slug)
    }
}

fn normalize(source: &str, preserve_case: bool) -> Option<String> {
    let trimmed = source.trim();
    let mut slug = String::with_capacity(trimmed.len());
    let mut previous_hyphen = false;

    for candidate in trimmed.chars() {
        match candidate {
            'A'..='Z' if !preserve_case => {
                slug.push(candidate.to_ascii_lowercase());
                previous_hyphen = false;
            }
            'A'..='Z' | 'a'..='z' | '0'..='9' | '_' | '.' => {
                slug.push(candidate);
                previous_hyphen = false;
            }
            _ => {
                if !previous_hyphen && !slug.is_empty() {
                    slug.push('-');
                    previous_hyphen = true;
                }
            }
        }
    }

    let slug = slug.trim_matches(|character| matches!(character, '-' | '.'));
    if slug.is_empty() { None } else { Some(slug.to_owned()) }
}
