use std::borrow::Cow;

use tracing::{debug, warn};

use crate::locale::Locale;
use crate::models::overlay::{
    AwardOverlay, BasicsOverlay, CertificateOverlay, EducationOverlay, EntryOverrides,
    OverlayTable, WorkOverlay,
};
use crate::models::resume::{AwardEntry, Basics, CertificateEntry, EducationEntry, Resume, WorkEntry};

/// How a localized record came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalizationOutcome {
    /// Requested locale is the authoring locale; the record is returned as is.
    BaseLocale,
    /// No overlay (or an empty one) exists for the locale; base content is used.
    MissingOverlay,
    /// Overrides were merged. `unmatched` counts overlay entries whose id has no base entry;
    /// `duplicated` counts overlay ids that hit more than one base entry.
    Applied {
        matched: usize,
        unmatched: usize,
        duplicated: usize,
    },
}

/// A record for one locale. Borrowed when nothing changed, owned otherwise.
#[derive(Debug, Clone)]
pub struct Localized<'a> {
    pub locale: Locale,
    pub resume: Cow<'a, Resume>,
    pub outcome: LocalizationOutcome,
}

impl Localized<'_> {
    pub fn resume(&self) -> &Resume {
        &self.resume
    }
}

/// Merges the overlay for `locale` onto a copy of `resume`.
pub fn localize<'a>(resume: &'a Resume, overlays: &OverlayTable, locale: Locale) -> Localized<'a> {
    if locale.is_base() {
        return Localized {
            locale,
            resume: Cow::Borrowed(resume),
            outcome: LocalizationOutcome::BaseLocale,
        };
    }

    let overlay = match overlays.get(locale.tag()) {
        Some(overlay) if !overlay.is_empty() => overlay,
        _ => {
            debug!("No overlay for {locale}; using base content");
            return Localized {
                locale,
                resume: Cow::Borrowed(resume),
                outcome: LocalizationOutcome::MissingOverlay,
            };
        }
    };

    let mut localized = resume.clone();
    let mut tally = Tally::default();

    if let Some(basics) = &overlay.basics {
        localized.basics.apply(basics);
    }
    tally.add(merge_section(&mut localized.work, &overlay.work, "work"));
    tally.add(merge_section(&mut localized.education, &overlay.education, "education"));
    tally.add(merge_section(&mut localized.awards, &overlay.awards, "awards"));
    tally.add(merge_section(
        &mut localized.certificates,
        &overlay.certificates,
        "certificates",
    ));

    Localized {
        locale,
        resume: Cow::Owned(localized),
        outcome: LocalizationOutcome::Applied {
            matched: tally.matched,
            unmatched: tally.unmatched,
            duplicated: tally.duplicated,
        },
    }
}

#[derive(Default)]
struct Tally {
    matched: usize,
    unmatched: usize,
    duplicated: usize,
}

impl Tally {
    fn add(&mut self, other: Tally) {
        self.matched += other.matched;
        self.unmatched += other.unmatched;
        self.duplicated += other.duplicated;
    }
}

/// An entry that overlays can address by identifier.
trait Overlayable {
    type Patch;

    fn id(&self) -> &str;
    fn apply(&mut self, patch: &Self::Patch);
}

fn merge_section<T: Overlayable>(
    entries: &mut [T],
    overrides: &EntryOverrides<T::Patch>,
    section: &str,
) -> Tally {
    let mut tally = Tally::default();
    if overrides.is_empty() {
        return tally;
    }

    for entry in entries.iter_mut() {
        if let Some(patch) = overrides.get(entry.id()) {
            entry.apply(patch);
        }
    }

    for id in overrides.keys() {
        match count_with_id(entries, id) {
            0 => {
                debug!("Ignoring {section} overlay for unknown id '{id}'");
                tally.unmatched += 1;
            }
            1 => tally.matched += 1,
            n => {
                warn!("{n} {section} entries share id '{id}'; all of them received the same override");
                tally.matched += 1;
                tally.duplicated += 1;
            }
        }
    }
    tally
}

fn count_with_id<T: Overlayable>(entries: &[T], id: &str) -> usize {
    entries.iter().filter(|e| e.id() == id).count()
}

/// `required` fields replace the value; `optional` fields replace it with `Some`.
macro_rules! apply_fields {
    ($target:expr, $patch:expr; required: [$($field:ident),*]; optional: [$($opt:ident),*]) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )*
        $(
            if let Some(value) = &$patch.$opt {
                $target.$opt = Some(value.clone());
            }
        )*
    };
}

impl Basics {
    fn apply(&mut self, patch: &BasicsOverlay) {
        apply_fields!(self, patch;
            required: [name, label, email, phone, summary, location, profiles];
            optional: [url]);
    }
}

impl Overlayable for WorkEntry {
    type Patch = WorkOverlay;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &WorkOverlay) {
        apply_fields!(self, patch;
            required: [name, position, highlights, keywords];
            optional: [location, url, start_date, end_date, summary]);
    }
}

impl Overlayable for EducationEntry {
    type Patch = EducationOverlay;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &EducationOverlay) {
        apply_fields!(self, patch;
            required: [institution, area, study_type, courses];
            optional: [url, start_date, end_date, score]);
    }
}

impl Overlayable for AwardEntry {
    type Patch = AwardOverlay;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &AwardOverlay) {
        apply_fields!(self, patch;
            required: [title, awarder];
            optional: [date, summary]);
    }
}

impl Overlayable for CertificateEntry {
    type Patch = CertificateOverlay;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: &CertificateOverlay) {
        apply_fields!(self, patch;
            required: [name, issuer];
            optional: [date, url, status]);
    }
}
