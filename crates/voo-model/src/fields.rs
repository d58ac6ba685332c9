//! Column names of the VOO exports that the rule battery reads.
//!
//! Names are kept exactly as they appear in the exports, typos included
//! (`Score de galsgow`).

/// Cross-file patient key used for deduplication.
pub const ID_CNR: &str = "Identifiant CNR";

pub const IDENTIFIANT: &str = "Identifiant";

// Dates
pub const DATE_DIAGNOSTIC: &str = "Date du diagnostic biologique";
pub const DATE_SYMPTOMES: &str = "Date des symptômes";
pub const DATE_RETOUR: &str = "Date de retour";
pub const DATE_PREMIERS_SYMPTOMES_ACCES: &str = "Date des premiers symptômes de cet accès";

// Species indicators (1 = positive)
pub const ESP_FALCIPARUM: &str = "Esp P falciparum";
pub const ESP_VIVAX: &str = "Esp P vivax";
pub const ESP_OVALE: &str = "Esp P ovale";
pub const ESP_MALARIAE: &str = "Esp P malariae";
pub const ESP_SPP: &str = "Esp Plasmodium spp";
pub const ESP_KNOWLESI: &str = "Esp P knowlesi";
pub const ESP_NEGATIVE: &str = "Esp Negative";

// Measurements
pub const PARASITEMIE: &str = "Parasitémie";
pub const PARASITEMIE_SUP_4: &str = "Parasitémie > 4%";
pub const SCORE_GLASGOW: &str = "Score de galsgow";
pub const TEMPERATURE: &str = "Température";
pub const DENSITE_POURCENT: &str = "Densité (%)";
pub const HB: &str = "Hb";
pub const PLAQUETTES: &str = "Plaquettes";
pub const DUREE_SEJOUR: &str = "Durée du séjour";
pub const CREATININEMIE: &str = "Créatininémie";
pub const CREATININEMIE_SUP_265: &str = "Créatininémie > 265 µmol/l (OMS)";

// Clinical yes/no fields
pub const TROUBLES_CONSCIENCE: &str = "Troubles de la conscience";
pub const COMA_AVERE: &str = "Coma avéré";
pub const TDR: &str = "Test de diagnostic rapide (TDR)";

// Rapid test antigens (1 = positive)
pub const AG_HRP2: &str = "Ag HRP-2";
pub const AG_COM_PLDH: &str = "Ag com pLDH";
pub const AG_PF_PLDH: &str = "Ag Pf pLDH";
pub const AG_PV_PLDH: &str = "Ag Pv pLDH";

// Countries
pub const PAYS_RESIDENCE: &str = "Pays de résidence";
pub const PAYS_VISITE_1: &str = "Pays visité 1";
pub const PAYS_VISITE_2: &str = "Pays visité 2";

/// Fields that must be filled on every record.
pub const MANDATORY: &[&str] = &[IDENTIFIANT, DATE_DIAGNOSTIC, ESP_FALCIPARUM];

/// Dates whose absence prevents any temporal analysis.
pub const CRITICAL_DATES: &[&str] = &[DATE_SYMPTOMES, DATE_RETOUR, DATE_DIAGNOSTIC];

/// Dates parsed by the temporal checks.
pub const TRACKED_DATES: &[&str] = &[
    DATE_SYMPTOMES,
    DATE_DIAGNOSTIC,
    DATE_PREMIERS_SYMPTOMES_ACCES,
    DATE_RETOUR,
];

/// Columns of which at least one must be filled for a species result to exist.
pub const SPECIES_EVIDENCE: &[&str] = &[
    PARASITEMIE,
    SCORE_GLASGOW,
    ESP_FALCIPARUM,
    ESP_VIVAX,
    ESP_OVALE,
    ESP_MALARIAE,
    ESP_SPP,
    ESP_KNOWLESI,
    ESP_NEGATIVE,
];

/// Antigen results expected when a rapid diagnostic test was performed.
pub const ANTIGENS: &[&str] = &[AG_HRP2, AG_COM_PLDH, AG_PF_PLDH, AG_PV_PLDH];

pub const COUNTRIES: &[&str] = &[PAYS_RESIDENCE, PAYS_VISITE_1, PAYS_VISITE_2];
