//! UI languages and string tables.
//!
//! Lookups go current language → English → the key itself, so a missing
//! translation degrades to English and a missing key is visible in the UI.

use strum::{AsRefStr, Display, EnumIter, EnumString};
use tracing::warn;

/// A supported UI language. Serializes as its ISO 639-1 code.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
}

impl Language {
    /// The language's own name, shown in the selector.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Es => "Español",
            Self::Fr => "Français",
        }
    }

    /// Parse a configured code, falling back to English.
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_else(|_| {
            warn!(code, "unknown language code, using English");
            Self::En
        })
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::En => EN,
            Self::Es => ES,
            Self::Fr => FR,
        }
    }
}

/// Localization context handed to screens and widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    pub fn language(self) -> Language {
        self.language
    }

    pub fn t(self, key: &'static str) -> &'static str {
        lookup(self.language.table(), key)
            .or_else(|| lookup(EN, key))
            .unwrap_or(key)
    }
}

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

// ── String tables ───────────────────────────────────────────────────

const EN: &[(&str, &str)] = &[
    ("app.title", "academia"),
    ("multi_select.placeholder", "Select options..."),
    ("multi_select.empty", "No options available."),
    ("multi_select.selected", "selected"),
    ("multi_select.search", "Search"),
    ("loading.message", "Loading data…"),
    ("loading.source", "Source"),
    ("screen.enrollments", "Enrollments"),
    ("screen.overview", "Overview"),
    ("filter.courses", "Courses"),
    ("filter.faculties", "Faculties"),
    ("table.student", "Student"),
    ("table.course", "Course"),
    ("table.title", "Title"),
    ("table.faculty", "Faculty"),
    ("table.year", "Year"),
    ("table.empty", "No enrollments match the current filters."),
    ("store.enrollments", "Enrollments"),
    ("store.faculties", "Faculties"),
    ("store.academic-years", "Academic years"),
    ("store.courses", "Courses"),
    ("overview.counts", "Loaded records"),
    ("overview.current_year", "Current academic year"),
    ("overview.last_load", "Last load"),
    ("overview.none", "none"),
    ("overview.failed", "failed"),
    ("overview.cancelled", "cancelled"),
    ("load.loading", "loading"),
    ("load.complete", "loaded"),
    ("load.partial", "partially loaded"),
    ("load.failed", "load failed"),
    ("load.cancelled", "load cancelled"),
    ("language.title", "Language"),
    ("hint.help", "help"),
    ("hint.quit", "quit"),
    ("hint.language", "language"),
    ("hint.reload", "reload"),
    ("help.title", "Keyboard Shortcuts"),
    ("help.navigation", "Navigation"),
    ("help.screens", "Switch screen"),
    ("help.focus", "Next filter / table"),
    ("help.move", "Move up/down"),
    ("help.open", "Open filter / toggle option"),
    ("help.close", "Close filter"),
    ("help.badges", "Pick badge / remove it"),
    ("help.global", "Global"),
    ("help.close_hint", "Esc or ? to close"),
];

const ES: &[(&str, &str)] = &[
    ("multi_select.placeholder", "Seleccionar opciones..."),
    ("multi_select.empty", "No hay opciones disponibles."),
    ("multi_select.selected", "seleccionados"),
    ("multi_select.search", "Buscar"),
    ("loading.message", "Cargando datos…"),
    ("loading.source", "Origen"),
    ("screen.enrollments", "Matrículas"),
    ("screen.overview", "Resumen"),
    ("filter.courses", "Asignaturas"),
    ("filter.faculties", "Facultades"),
    ("table.student", "Estudiante"),
    ("table.course", "Asignatura"),
    ("table.title", "Título"),
    ("table.faculty", "Facultad"),
    ("table.year", "Curso"),
    ("table.empty", "Ninguna matrícula coincide con los filtros."),
    ("store.enrollments", "Matrículas"),
    ("store.faculties", "Facultades"),
    ("store.academic-years", "Cursos académicos"),
    ("store.courses", "Asignaturas"),
    ("overview.counts", "Registros cargados"),
    ("overview.current_year", "Curso académico actual"),
    ("overview.last_load", "Última carga"),
    ("overview.none", "ninguna"),
    ("overview.failed", "error"),
    ("overview.cancelled", "cancelada"),
    ("load.loading", "cargando"),
    ("load.complete", "cargado"),
    ("load.partial", "carga parcial"),
    ("load.failed", "error de carga"),
    ("load.cancelled", "carga cancelada"),
    ("language.title", "Idioma"),
    ("hint.help", "ayuda"),
    ("hint.quit", "salir"),
    ("hint.language", "idioma"),
    ("hint.reload", "recargar"),
    ("help.title", "Atajos de teclado"),
    ("help.navigation", "Navegación"),
    ("help.screens", "Cambiar pantalla"),
    ("help.focus", "Siguiente filtro / tabla"),
    ("help.move", "Subir/bajar"),
    ("help.open", "Abrir filtro / marcar opción"),
    ("help.close", "Cerrar filtro"),
    ("help.badges", "Elegir etiqueta / quitarla"),
    ("help.global", "General"),
    ("help.close_hint", "Esc o ? para cerrar"),
];

const FR: &[(&str, &str)] = &[
    ("multi_select.placeholder", "Sélectionner des options..."),
    ("multi_select.empty", "Aucune option disponible."),
    ("multi_select.selected", "sélectionnés"),
    ("multi_select.search", "Rechercher"),
    ("loading.message", "Chargement des données…"),
    ("loading.source", "Source"),
    ("screen.enrollments", "Inscriptions"),
    ("screen.overview", "Aperçu"),
    ("filter.courses", "Cours"),
    ("filter.faculties", "Facultés"),
    ("table.student", "Étudiant"),
    ("table.course", "Cours"),
    ("table.title", "Intitulé"),
    ("table.faculty", "Faculté"),
    ("table.year", "Année"),
    ("table.empty", "Aucune inscription ne correspond aux filtres."),
    ("store.enrollments", "Inscriptions"),
    ("store.faculties", "Facultés"),
    ("store.academic-years", "Années universitaires"),
    ("store.courses", "Cours"),
    ("overview.counts", "Enregistrements chargés"),
    ("overview.current_year", "Année universitaire en cours"),
    ("overview.last_load", "Dernier chargement"),
    ("overview.none", "aucun"),
    ("overview.failed", "échec"),
    ("overview.cancelled", "annulé"),
    ("load.loading", "chargement"),
    ("load.complete", "chargé"),
    ("load.partial", "chargement partiel"),
    ("load.failed", "échec du chargement"),
    ("load.cancelled", "chargement annulé"),
    ("language.title", "Langue"),
    ("hint.help", "aide"),
    ("hint.quit", "quitter"),
    ("hint.language", "langue"),
    ("hint.reload", "recharger"),
    ("help.title", "Raccourcis clavier"),
    ("help.navigation", "Navigation"),
    ("help.screens", "Changer d'écran"),
    ("help.focus", "Filtre suivant / tableau"),
    ("help.move", "Monter/descendre"),
    ("help.open", "Ouvrir le filtre / cocher"),
    ("help.close", "Fermer le filtre"),
    ("help.badges", "Choisir un badge / le retirer"),
    ("help.global", "Général"),
    ("help.close_hint", "Esc ou ? pour fermer"),
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn language_codes_round_trip() {
        for lang in Language::iter() {
            assert_eq!(Language::from_code(lang.as_ref()), lang);
        }
        assert_eq!(Language::from_code(" FR "), Language::Fr);
        assert_eq!(Language::from_code("de"), Language::En);
    }

    #[test]
    fn translates_current_language() {
        let i18n = I18n::new(Language::Es);
        assert_eq!(i18n.t("multi_select.empty"), "No hay opciones disponibles.");
        assert_eq!(
            I18n::default().t("multi_select.placeholder"),
            "Select options..."
        );
    }

    #[test]
    fn falls_back_to_english_then_key() {
        let i18n = I18n::new(Language::Fr);
        assert_eq!(i18n.t("app.title"), "academia");
        assert_eq!(i18n.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn every_translation_key_exists_in_english() {
        for table in [ES, FR] {
            for (key, _) in table {
                assert!(lookup(EN, key).is_some(), "{key} missing from English");
            }
        }
    }
}
