/*!
 * Knowledge base of Wikipedia policies, guidelines, and essays.
 *
 * The knowledge base is an immutable catalog built once at process start.
 * Each entry is a canonical page name plus a derived URL; shortcuts
 * ("NPOV", "RS", ...) are kept in a separate case-insensitive index that
 * maps each alias to exactly one canonical name.
 *
 * Collision policy: the first registration of a shortcut alias wins, and
 * aliases whose canonical page is absent from every category are dropped
 * at build time. Neither case is an error at lookup time.
 */

use std::collections::HashMap;
use std::fmt;

use log::debug;
use once_cell::sync::Lazy;
use serde::Serialize;

/// The three kinds of pages the analyzer recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Policy,
    Guideline,
    Essay,
}

impl Category {
    /// All categories, in detection-precedence order.
    pub const ALL: [Category; 3] = [Category::Policy, Category::Guideline, Category::Essay];

    /// Singular lowercase label ("policy").
    pub fn singular(&self) -> &'static str {
        match self {
            Self::Policy => "policy",
            Self::Guideline => "guideline",
            Self::Essay => "essay",
        }
    }

    /// Plural lowercase label ("policies").
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Policy => "policies",
            Self::Guideline => "guidelines",
            Self::Essay => "essays",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.singular())
    }
}

/// One catalog entry: a canonical page name and its derived URL.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    /// Canonical display name, e.g. "Neutral point of view"
    pub name: String,

    /// Derived page URL
    pub url: String,
}

/// Immutable catalog of known policy, guideline, and essay pages.
#[derive(Debug)]
pub struct KnowledgeBase {
    policies: Vec<KnowledgeEntry>,
    guidelines: Vec<KnowledgeEntry>,
    essays: Vec<KnowledgeEntry>,

    /// Uppercased shortcut alias -> canonical name
    shortcuts: HashMap<String, String>,

    /// Lowercased canonical name -> owning category
    categories: HashMap<String, Category>,
}

impl KnowledgeBase {
    /// Start building a knowledge base.
    pub fn builder() -> KnowledgeBaseBuilder {
        KnowledgeBaseBuilder::default()
    }

    /// The built-in catalog, constructed once and shared for the process lifetime.
    pub fn builtin() -> &'static KnowledgeBase {
        &BUILTIN
    }

    /// Derive the canonical URL for a page name.
    pub fn canonical_url(name: &str) -> String {
        format!(
            "https://en.wikipedia.org/wiki/Wikipedia:{}",
            name.replace(' ', "_")
        )
    }

    /// All entries in one category, in registration order.
    pub fn entries(&self, category: Category) -> &[KnowledgeEntry] {
        match category {
            Category::Policy => &self.policies,
            Category::Guideline => &self.guidelines,
            Category::Essay => &self.essays,
        }
    }

    /// Which category a canonical name belongs to, if any.
    pub fn category_of(&self, name: &str) -> Option<Category> {
        self.categories.get(&name.to_lowercase()).copied()
    }

    /// Look up an entry by category and canonical name (case-insensitive).
    pub fn entry(&self, category: Category, name: &str) -> Option<&KnowledgeEntry> {
        self.entries(category)
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Resolve a shortcut alias (without the "WP:" prefix) to its entry.
    pub fn resolve_shortcut(&self, alias: &str) -> Option<(Category, &KnowledgeEntry)> {
        let name = self.shortcuts.get(&alias.to_uppercase())?;
        let category = self.category_of(name)?;
        self.entry(category, name).map(|e| (category, e))
    }

    /// Resolve a wiki page name against the catalog.
    ///
    /// A page name matches an entry when it equals the canonical name or
    /// contains it, case-insensitively. Categories are scanned in
    /// precedence order and the first match wins.
    pub fn resolve_page_name(&self, page_name: &str) -> Option<(Category, &KnowledgeEntry)> {
        let needle = page_name.to_lowercase();
        for category in Category::ALL {
            for entry in self.entries(category) {
                let name = entry.name.to_lowercase();
                if needle == name || needle.contains(&name) {
                    return Some((category, entry));
                }
            }
        }
        None
    }

    /// All shortcut aliases registered for a canonical name.
    pub fn shortcuts_for(&self, name: &str) -> Vec<&str> {
        let mut aliases: Vec<&str> = self
            .shortcuts
            .iter()
            .filter(|(_, target)| target.eq_ignore_ascii_case(name))
            .map(|(alias, _)| alias.as_str())
            .collect();
        aliases.sort_unstable();
        aliases
    }

    /// Total number of catalog entries across all categories.
    pub fn len(&self) -> usize {
        self.policies.len() + self.guidelines.len() + self.essays.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builder for [`KnowledgeBase`] applying the first-wins collision policy.
#[derive(Debug, Default)]
pub struct KnowledgeBaseBuilder {
    items: Vec<(Category, String)>,
    shortcuts: Vec<(String, String)>,
}

impl KnowledgeBaseBuilder {
    /// Register a catalog entry under a category.
    pub fn item(mut self, category: Category, name: &str) -> Self {
        self.items.push((category, name.to_string()));
        self
    }

    /// Register a shortcut alias for a canonical name.
    pub fn shortcut(mut self, alias: &str, name: &str) -> Self {
        self.shortcuts.push((alias.to_string(), name.to_string()));
        self
    }

    /// Build the immutable knowledge base.
    pub fn build(self) -> KnowledgeBase {
        let mut kb = KnowledgeBase {
            policies: Vec::new(),
            guidelines: Vec::new(),
            essays: Vec::new(),
            shortcuts: HashMap::new(),
            categories: HashMap::new(),
        };

        for (category, name) in self.items {
            let key = name.to_lowercase();
            if kb.categories.contains_key(&key) {
                debug!("Duplicate catalog entry '{}' ignored (first registration wins)", name);
                continue;
            }
            kb.categories.insert(key, category);
            let entry = KnowledgeEntry {
                url: KnowledgeBase::canonical_url(&name),
                name,
            };
            match category {
                Category::Policy => kb.policies.push(entry),
                Category::Guideline => kb.guidelines.push(entry),
                Category::Essay => kb.essays.push(entry),
            }
        }

        for (alias, name) in self.shortcuts {
            let key = alias.to_uppercase();
            if kb.shortcuts.contains_key(&key) {
                debug!("Duplicate shortcut '{}' ignored (first registration wins)", alias);
                continue;
            }
            if !kb.categories.contains_key(&name.to_lowercase()) {
                debug!("Shortcut '{}' targets unknown page '{}', dropped", alias, name);
                continue;
            }
            kb.shortcuts.insert(key, name);
        }

        kb
    }
}

static BUILTIN: Lazy<KnowledgeBase> = Lazy::new(build_builtin);

fn build_builtin() -> KnowledgeBase {
    const POLICIES: &[&str] = &[
        "Neutral point of view",
        "No original research",
        "Verifiability",
        "Article titles",
        "Biographies of living persons",
        "Image use policy",
        "What Wikipedia is not",
        "Block evasion",
        "Civility",
        "Clean start",
        "Consensus",
        "Dispute resolution",
        "Edit warring",
        "Editing policy",
        "Harassment",
        "No personal attacks",
        "No legal threats",
        "Ownership of content",
        "Sockpuppetry",
        "Username policy",
        "Vandalism",
        "Deletion policy",
        "Speedy deletion",
        "Proposed deletion",
        "Proposed deletion (BLP)",
        "Revision deletion",
        "Oversight",
    ];

    const GUIDELINES: &[&str] = &[
        "Assume good faith",
        "Conflict of interest",
        "Disruptive editing",
        "Don't bite the newcomers",
        "Don't disrupt to make a point",
        "Etiquette",
        "Gaming the system",
        "Citing sources",
        "External links",
        "Reliable sources",
        "Fringe theories",
        "Naming conventions",
        "Non-free content",
        "Offensive material",
        "Article size",
        "Be bold",
        "Understandability",
        "Categories, lists, templates",
        "Categorization",
        "Disambiguation",
        "Manual of Style",
        "Notability",
        "Deletion process",
    ];

    const ESSAYS: &[&str] = &[
        "What no consensus really means",
        "One against many",
        "Getting your way at Wikipedia",
        "Lob a grenade and run away",
        "Always keep context in mind when arguing claims",
        "Academic Neutrality",
        "Avoid contemporary sources",
        "A POV that draws a source.",
        "Beyond the Neutral Point of View",
        "Civil POV pushing is POV pushing",
        "CIVIL POV Pushing Strategies",
        "Gendered category criterion",
        "Yes. We are biased.",
        "Don't act neutral",
        "Don't throw your POV up to the sky",
        "Systemic bias against Transformers",
        "Neutrality and consensus",
        "Neutrality of sources",
        "Neutral = source-oriented",
        "No. We are not biased.",
        "NPOV, a detailed breakdown",
        "Asymmetric controversy",
        "Crying MEDRS!",
        "Lede bombing",
        "The big mistake",
        "Writing neutrally for Wikipedia",
        "Prefer truth",
        "Splitting the difference",
        "Reliable sources for geopolitical adversaries",
        "Media, Politics, and Peace",
        "ChristianityAndNPOV",
        "Essjay neutrality",
        "Yes, you are a nerd.",
        "When interest compromises neutrality",
    ];

    // Official shortcuts plus common variations editors actually type.
    // Aliases whose target page is not in the catalog are dropped at build
    // time; they stay listed here so the table matches what appears in the
    // wild.
    const SHORTCUTS: &[(&str, &str)] = &[
        // Policies
        ("NPOV", "Neutral point of view"),
        ("NOR", "No original research"),
        ("OR", "No original research"),
        ("V", "Verifiability"),
        ("VERIFY", "Verifiability"),
        ("VERIFIABLE", "Verifiability"),
        ("BLP", "Biographies of living persons"),
        ("NOT", "What Wikipedia is not"),
        ("NOTCENSORED", "What Wikipedia is not"),
        ("CENSORED", "What Wikipedia is not"),
        ("CIVIL", "Civility"),
        ("CIVILITY", "Civility"),
        ("CON", "Consensus"),
        ("CONSENSUS", "Consensus"),
        ("EW", "Edit warring"),
        ("EDITWAR", "Edit warring"),
        ("3RR", "Edit warring"),
        ("NPA", "No personal attacks"),
        ("PA", "No personal attacks"),
        ("SOCK", "Sockpuppetry"),
        ("SOCKPUPPET", "Sockpuppetry"),
        ("VAND", "Vandalism"),
        ("VANDAL", "Vandalism"),
        ("VANDALISM", "Vandalism"),
        ("UNDUE", "Neutral point of view"),
        ("WEIGHT", "Neutral point of view"),
        ("DUE", "Neutral point of view"),
        // Guidelines
        ("AGF", "Assume good faith"),
        ("FAITH", "Assume good faith"),
        ("COI", "Conflict of interest"),
        ("CONFLICT", "Conflict of interest"),
        ("BITE", "Don't bite the newcomers"),
        ("POINT", "Don't disrupt to make a point"),
        ("GAME", "Gaming the system"),
        ("GAMING", "Gaming the system"),
        ("CITE", "Citing sources"),
        ("CITATION", "Citing sources"),
        ("EL", "External links"),
        ("RS", "Reliable sources"),
        ("RELIABLE", "Reliable sources"),
        ("SOURCE", "Reliable sources"),
        ("SOURCES", "Reliable sources"),
        ("FRINGE", "Fringe theories"),
        ("MOS", "Manual of Style"),
        ("STYLE", "Manual of Style"),
        ("N", "Notability"),
        ("NOTABLE", "Notability"),
        ("NOTABILITY", "Notability"),
        ("BRD", "Be bold"),
        ("BOLD", "Be bold"),
        ("DISRUPTIVE", "Disruptive editing"),
        ("DISRUPT", "Disruptive editing"),
        // Essays
        ("IAR", "Ignore all rules"),
        ("DEADLINE", "There is no deadline"),
        ("COMMON", "Common sense"),
        ("1AM", "One against many"),
        ("GRENADE", "Lob a grenade and run away"),
        ("POVPUSH", "Civil POV pushing is POV pushing"),
        ("STICK", "Always keep context in mind when arguing claims"),
        ("BEANS", "Always keep context in mind when arguing claims"),
        ("TRUTH", "Prefer truth"),
        ("SPLIT", "Splitting the difference"),
    ];

    let mut builder = KnowledgeBase::builder();
    for name in POLICIES {
        builder = builder.item(Category::Policy, name);
    }
    for name in GUIDELINES {
        builder = builder.item(Category::Guideline, name);
    }
    for name in ESSAYS {
        builder = builder.item(Category::Essay, name);
    }
    for (alias, name) in SHORTCUTS {
        builder = builder.shortcut(alias, name);
    }
    builder.build()
}
