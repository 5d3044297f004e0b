//! Deterministic clean-up of machine translated Spanish.
//!
//! Backends get most of a manual page right but stumble over a handful of
//! technical terms, English negations they leave untouched, and spacing around
//! punctuation. The rules here run on backend output only when the target is
//! Spanish; every other language passes through untouched.
//!
//! Rules run in a fixed order:
//!
//! 1. phrase overrides (whole known sentences, may span wrapped lines)
//! 2. technical glossary
//! 3. `do not VERB` / `don't VERB` → `no INFINITIVO`
//! 4. `non-X` / `non X` → `no X`
//! 5. fixed phrases (`starting with`, `ending with`, `in columns`, ...)
//! 6. punctuation spacing
//!
//! Section titles never go through a backend; [`map_section_title`] maps the
//! canonical manual page vocabulary instead.

use crate::mt::error::{MtError, MtResult};
use regex::{Captures, NoExpand, Regex};
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

/// Technical terms the backends translate poorly, in application order.
const GLOSSARY: &[(&str, &str)] = &[
    ("Anchoring", "Anclaje"),
    ("Anchor", "Ancla"),
    ("Anchors", "Anclas"),
    (
        "The Backslash Character and Special Expressions",
        "El carácter barra invertida y las expresiones especiales",
    ),
    (
        "Output Line Prefix Control",
        "Control del prefijo de las líneas de salida",
    ),
    ("Reporting Bugs", "Informe de errores"),
    ("The Backslash Character", "El carácter barra invertida"),
    ("Special Expressions", "Expresiones especiales"),
    ("Character classes", "Clases de caracteres"),
    ("Wildcard matching", "Coincidencia con comodines"),
    ("Bracket expressions", "Expresiones entre corchetes"),
    ("Regular expressions", "Expresiones regulares"),
    ("Metacharacters", "Metacaracteres"),
    ("Quantifiers", "Cuantificadores"),
    ("Repetition", "Repetición"),
];

/// Canonical manual page section titles.
const SECTION_TITLES: &[(&str, &str)] = &[
    ("NAME", "NOMBRE"),
    ("SYNOPSIS", "SINOPSIS"),
    ("DESCRIPTION", "DESCRIPCIÓN"),
    ("OPTIONS", "OPCIONES"),
    ("EXIT STATUS", "ESTADO DE SALIDA"),
    ("RETURN VALUE", "VALOR DE RETORNO"),
    ("ENVIRONMENT", "ENTORNO"),
    ("FILES", "ARCHIVOS"),
    ("AUTHOR", "AUTOR"),
    ("REPORTING BUGS", "INFORME DE ERRORES"),
    ("COPYRIGHT", "DERECHOS DE AUTOR"),
    ("SEE ALSO", "VÉASE TAMBIÉN"),
];

/// Subsection titles rendered as custom upper-case headings.
const CUSTOM_TITLES: &[(&str, &str)] = &[
    ("Anchoring", "ANCLAJE"),
    (
        "The Backslash Character and Special Expressions",
        "CARÁCTER BARRA INVERTIDA Y EXPRESIONES ESPECIALES",
    ),
    ("Repetition", "REPETICIÓN"),
];

/// English verbs seen after "do not" in manual pages, with their infinitive.
const VERB_INFINITIVES: &[(&str, &str)] = &[
    ("ignore", "ignorar"),
    ("list", "listar"),
    ("print", "imprimir"),
    ("show", "mostrar"),
    ("display", "mostrar"),
    ("include", "incluir"),
    ("exclude", "excluir"),
    ("sort", "ordenar"),
    ("use", "usar"),
    ("append", "añadir"),
    ("enclose", "encerrar"),
    ("reverse", "invertir"),
    ("scale", "escalar"),
    ("color", "colorear"),
    ("hide", "ocultar"),
    ("write", "escribir"),
    ("read", "leer"),
    ("search", "buscar"),
    ("follow", "seguir"),
    ("output", "mostrar"),
    ("report", "informar"),
    ("suppress", "suprimir"),
    ("treat", "tratar"),
    ("change", "cambiar"),
    ("strip", "eliminar"),
];

/// Known grep(1) sentences Argos mangles. Spaces match any whitespace run.
const GREP_OVERRIDES: &[(&str, &str)] = &[
    (
        r"Skip any command-line file with a name suffix that matches? the pattern GLOB, using wildcard matching; a name suffix is either the whole name, or a trailing part that starts with a non-slash character immediately after a slash \(/\) in the name\.",
        "Saltar cualquier archivo de línea de comandos cuyo nombre termine con el patrón GLOB, \
         usando coincidencia con comodines; un sufijo de nombre puede ser el nombre completo o \
         la parte final que empieza con un carácter que no es / justo después de una barra (/).",
    ),
    (
        r"Skip any command-line directory with a name suffix that match(?:es)? the pattern GLOB\.",
        "Saltar cualquier directorio de línea de comandos cuyo nombre termine con el patrón GLOB.",
    ),
    (
        r"and --exclude options are given, the last matching one wins\.",
        "y se dan opciones --exclude, la última coincidencia es la que prevalece.",
    ),
    (
        r"Skip any command-line file with a name suffix that match(?:es|ing)? the pattern GLOB,.*?;",
        "Saltar cualquier archivo de línea de comandos cuyo nombre tenga un sufijo que coincida \
         con el patrón GLOB, usando coincidencia con comodines;",
    ),
    (
        r"Suppress error messages about (?:nonexistent|non-existent|no existent) or unreadable files\.",
        "Suprime los mensajes de error sobre archivos inexistentes o ilegibles.",
    ),
];

static GLOSSARY_RES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    GLOSSARY
        .iter()
        .map(|(en, es)| {
            let re = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(en)))
                .expect("glossary regex");
            (re, *es)
        })
        .collect()
});

static BUILTIN_OVERRIDES: LazyLock<Vec<PhraseOverride>> = LazyLock::new(|| {
    GREP_OVERRIDES
        .iter()
        .map(|(pattern, replacement)| {
            PhraseOverride::new(&pattern.replace(' ', r"\s+"), replacement)
                .expect("built-in override regex")
        })
        .collect()
});

static DO_NOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(do not|don['’]t)\s+([a-z]+)\b").expect("do-not regex")
});

static NON_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(non)[-\s]([a-záéíóúüñ]+)\b").expect("non-prefix regex")
});

static FIXED_PHRASES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\bstarting with\b", "que comienzan por"),
        (r"(?i)\bending with\b", "que terminan con"),
        (r"(?i)\bby columns\b", "en columnas"),
        (r"(?i)\bin columns\b", "en columnas"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("phrase regex"), replacement))
    .collect()
});

static GLUED_PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.,;:!?])(\S)").expect("punctuation regex"));

static GLUED_APOSTROPHE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\S)'").expect("apostrophe regex"));

/// One entry of the phrase override table: a regex and its literal replacement.
///
/// Patterns run in dot-matches-newline mode so a non-greedy `.*?` can cross the
/// line breaks of a wrapped sentence.
#[derive(Debug, Clone)]
pub struct PhraseOverride {
    pattern: Regex,
    replacement: String,
}

#[derive(Debug, Deserialize)]
struct OverrideSpec {
    pattern: String,
    replacement: String,
}

impl PhraseOverride {
    pub fn new(pattern: &str, replacement: &str) -> MtResult<Self> {
        let pattern = Regex::new(&format!("(?s){}", pattern))
            .map_err(|e| MtError::ConfigError(format!("bad override pattern: {}", e)))?;
        Ok(Self {
            pattern,
            replacement: replacement.to_string(),
        })
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, NoExpand(&self.replacement))
            .into_owned()
    }
}

/// The built-in override table (grep(1) phrases).
pub fn builtin_overrides() -> Vec<PhraseOverride> {
    BUILTIN_OVERRIDES.clone()
}

/// Parse an override table from JSON: `[{"pattern": "...", "replacement": "..."}]`
pub fn parse_overrides(json: &str) -> MtResult<Vec<PhraseOverride>> {
    let specs: Vec<OverrideSpec> = serde_json::from_str(json)
        .map_err(|e| MtError::ConfigError(format!("invalid override table: {}", e)))?;
    specs
        .iter()
        .map(|spec| PhraseOverride::new(&spec.pattern, &spec.replacement))
        .collect()
}

/// Read and parse an override table file
pub fn load_overrides(path: &Path) -> MtResult<Vec<PhraseOverride>> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        MtError::ConfigError(format!("cannot read {}: {}", path.display(), e))
    })?;
    parse_overrides(&json)
}

/// Spanish post-processor holding the phrase override table
#[derive(Debug, Clone)]
pub struct LocaleFixer {
    overrides: Vec<PhraseOverride>,
}

impl Default for LocaleFixer {
    fn default() -> Self {
        Self::new(builtin_overrides())
    }
}

impl LocaleFixer {
    pub fn new(overrides: Vec<PhraseOverride>) -> Self {
        Self { overrides }
    }

    /// Append overrides after the existing ones
    pub fn with_overrides(mut self, extra: Vec<PhraseOverride>) -> Self {
        self.overrides.extend(extra);
        self
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Apply every Spanish rule to `text`; identity when the target is not Spanish
    pub fn fix(&self, text: &str, target_is_spanish: bool) -> String {
        if !target_is_spanish {
            return text.to_string();
        }

        let mut out = text.to_string();
        for rule in &self.overrides {
            out = rule.apply(&out);
        }
        out = apply_glossary(&out);
        out = fix_do_not(&out);
        out = fix_non_prefix(&out);
        out = apply_fixed_phrases(&out);
        fix_punctuation_spacing(&out)
    }
}

/// Replace glossary terms (case-insensitive, whole words)
pub fn apply_glossary(text: &str) -> String {
    let mut out = text.to_string();
    for (re, es) in GLOSSARY_RES.iter() {
        out = re.replace_all(&out, NoExpand(es)).into_owned();
    }
    out
}

/// `do not VERB` / `don't VERB` → `no INFINITIVO`
///
/// Unknown verbs are kept (lower-cased). A capitalised `Do` gives `No`.
pub fn fix_do_not(text: &str) -> String {
    DO_NOT_RE
        .replace_all(text, |caps: &Captures| {
            let verb = caps[2].to_lowercase();
            let infinitive = VERB_INFINITIVES
                .iter()
                .find(|(en, _)| *en == verb)
                .map(|(_, es)| es.to_string())
                .unwrap_or(verb);
            let no = if caps[1].starts_with('D') { "No" } else { "no" };
            format!("{} {}", no, infinitive)
        })
        .into_owned()
}

/// `non-X` / `non X` → `no X`
pub fn fix_non_prefix(text: &str) -> String {
    NON_PREFIX_RE
        .replace_all(text, |caps: &Captures| {
            let no = if caps[1].starts_with('N') { "No" } else { "no" };
            format!("{} {}", no, &caps[2])
        })
        .into_owned()
}

fn apply_fixed_phrases(text: &str) -> String {
    let mut out = text.to_string();
    for (re, es) in FIXED_PHRASES.iter() {
        out = re.replace_all(&out, NoExpand(es)).into_owned();
    }
    out
}

/// Put a space after punctuation glued to the next word, and before a glued apostrophe
///
/// Applied to every rendered paragraph and option description, whatever the
/// target language.
pub fn fix_punctuation_spacing(text: &str) -> String {
    let spaced = GLUED_PUNCT_RE.replace_all(text, "$1 $2");
    GLUED_APOSTROPHE_RE.replace_all(&spaced, "$1 '").into_owned()
}

/// Title to print for a section heading
///
/// Spanish targets map the canonical vocabulary (`NAME` → `NOMBRE`) and a few
/// custom subsection headings; anything unknown, and every other target,
/// keeps the original title.
pub fn map_section_title(title: &str, target_is_spanish: bool) -> String {
    if !target_is_spanish {
        return title.to_string();
    }

    let upper = title.to_uppercase();
    if let Some((_, es)) = SECTION_TITLES.iter().find(|(en, _)| *en == upper) {
        return es.to_string();
    }
    if let Some((_, es)) = CUSTOM_TITLES
        .iter()
        .find(|(en, _)| en.eq_ignore_ascii_case(title))
    {
        return es.to_string();
    }
    title.to_string()
}
