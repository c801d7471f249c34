//! Rule-based classification of disruption text.
//!
//! The upstream feed carries free text only; GTFS-RT wants a `Cause` and an
//! `Effect` from fixed enumerations. Classification runs two ordered tables
//! of substring rules over the concatenated title and description; the
//! first matching rule wins, so earlier rules take precedence on
//! overlapping matches. Rule order is part of the contract.
//!
//! A disruption no rule matches falls back to `UNKNOWN_CAUSE` /
//! `UNKNOWN_EFFECT` and is logged: each such log line is a candidate for a
//! new table row.

use gtfs_realtime::alert::{Cause, Effect};
use tracing::warn;

use crate::domain::Disruption;

/// One row of a classification table.
///
/// `needles` for case-insensitive rules are stored lowercase and matched
/// against the lowercased text.
struct Rule<T: 'static> {
    needles: &'static [&'static str],
    fold_case: bool,
    verdict: T,
}

const CAUSE_RULES: &[Rule<Cause>] = &[
    Rule {
        needles: &["Demonstration"],
        fold_case: false,
        verdict: Cause::Demonstration,
    },
    Rule {
        needles: &["unfall"],
        fold_case: true,
        verdict: Cause::Accident,
    },
    Rule {
        needles: &["Streik"],
        fold_case: false,
        verdict: Cause::Strike,
    },
    Rule {
        needles: &["technisch", "schadhaft", "gleisschaden"],
        fold_case: true,
        verdict: Cause::TechnicalProblem,
    },
    Rule {
        needles: &["witterung"],
        fold_case: true,
        verdict: Cause::Weather,
    },
    Rule {
        needles: &["Wartung"],
        fold_case: false,
        verdict: Cause::Maintenance,
    },
    Rule {
        needles: &["Rettungseinsatz"],
        fold_case: false,
        verdict: Cause::MedicalEmergency,
    },
    Rule {
        needles: &["Feuerwehreinsatz"],
        fold_case: false,
        verdict: Cause::Accident,
    },
    Rule {
        needles: &["Polizeieinsatz"],
        fold_case: false,
        verdict: Cause::PoliceActivity,
    },
    Rule {
        needles: &["Bauarbeiten"],
        fold_case: false,
        verdict: Cause::Construction,
    },
    Rule {
        needles: &["Fahrtbehinderung", "Falschparker", "Verkehrsüberlastung"],
        fold_case: false,
        verdict: Cause::OtherCause,
    },
];

const EFFECT_RULES: &[Rule<Effect>] = &[
    // Irregular intervals are announced for all kinds of minor hiccups and
    // carry no usable signal.
    Rule {
        needles: &["unterschiedlichen Intervallen"],
        fold_case: false,
        verdict: Effect::UnknownEffect,
    },
    Rule {
        needles: &[
            "Verspätungen",
            "Längere Wartezeiten",
            "Planen Sie daher bitte mehr Zeit ein",
            "Verzögerung",
        ],
        fold_case: false,
        verdict: Effect::SignificantDelays,
    },
    Rule {
        needles: &["Weichen Sie", "Betrieb ab", "Betrieb nur bis", "Fahrtbehinderung"],
        fold_case: false,
        verdict: Effect::ReducedService,
    },
    Rule {
        needles: &[
            "Betrieb ist derzeit eingestellt",
            "Züge halten ",
            "Busse halten ",
            "an der Weiterfahrt gehindert",
        ],
        fold_case: false,
        verdict: Effect::NoService,
    },
    Rule {
        needles: &["nicht eingehalten werden"],
        fold_case: false,
        verdict: Effect::StopMoved,
    },
];

/// A disruption with its derived GTFS-RT cause and effect.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedDisruption {
    pub disruption: Disruption,
    pub cause: Cause,
    pub effect: Effect,
}

/// Derive cause and effect from a disruption's title and description.
pub fn classify(title: &str, description: &str) -> (Cause, Effect) {
    let all_text = format!("{title} {description}");
    let folded = all_text.to_lowercase();

    let cause = first_match(CAUSE_RULES, &all_text, &folded).unwrap_or_else(|| {
        warn!(text = %all_text, "no cause rule matched");
        Cause::UnknownCause
    });

    let effect = first_match(EFFECT_RULES, &all_text, &folded).unwrap_or_else(|| {
        warn!(text = %all_text, "no effect rule matched");
        Effect::UnknownEffect
    });

    (cause, effect)
}

/// Classify every disruption, preserving order.
pub fn classify_all(disruptions: Vec<Disruption>) -> Vec<ClassifiedDisruption> {
    disruptions
        .into_iter()
        .map(|disruption| {
            let (cause, effect) = classify(&disruption.title, &disruption.description);
            ClassifiedDisruption {
                disruption,
                cause,
                effect,
            }
        })
        .collect()
}

fn first_match<T: Copy>(rules: &[Rule<T>], text: &str, folded: &str) -> Option<T> {
    rules
        .iter()
        .find(|rule| {
            let haystack = if rule.fold_case { folded } else { text };
            rule.needles.iter().any(|needle| haystack.contains(needle))
        })
        .map(|rule| rule.verdict)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause_of(text: &str) -> Cause {
        classify(text, "").0
    }

    fn effect_of(text: &str) -> Effect {
        classify("", text).1
    }

    #[test]
    fn cause_rules_match() {
        assert_eq!(cause_of("Demonstration am Ring"), Cause::Demonstration);
        assert_eq!(cause_of("Verkehrsunfall mit PKW"), Cause::Accident);
        assert_eq!(cause_of("Streik des Fahrpersonals"), Cause::Strike);
        assert_eq!(cause_of("Technische Störung"), Cause::TechnicalProblem);
        assert_eq!(cause_of("schadhaftes Fahrzeug"), Cause::TechnicalProblem);
        assert_eq!(cause_of("Gleisschaden"), Cause::TechnicalProblem);
        assert_eq!(cause_of("Witterungsbedingte Störung"), Cause::Weather);
        assert_eq!(cause_of("Wartungsarbeiten am Aufzug"), Cause::Maintenance);
        assert_eq!(cause_of("Rettungseinsatz im Gleis"), Cause::MedicalEmergency);
        assert_eq!(cause_of("Feuerwehreinsatz neben der Strecke"), Cause::Accident);
        assert_eq!(cause_of("Polizeieinsatz am Bahnsteig"), Cause::PoliceActivity);
        assert_eq!(cause_of("Bauarbeiten im Bereich Hietzing"), Cause::Construction);
        assert_eq!(cause_of("Fahrtbehinderung durch PKW"), Cause::OtherCause);
        assert_eq!(cause_of("Falschparker blockiert Gleis"), Cause::OtherCause);
        assert_eq!(cause_of("Verkehrsüberlastung im Abschnitt"), Cause::OtherCause);
    }

    #[test]
    fn effect_rules_match() {
        assert_eq!(
            effect_of("Züge fahren in unterschiedlichen Intervallen"),
            Effect::UnknownEffect
        );
        assert_eq!(effect_of("Es kommt zu Verspätungen"), Effect::SignificantDelays);
        assert_eq!(effect_of("Längere Wartezeiten möglich"), Effect::SignificantDelays);
        assert_eq!(
            effect_of("Planen Sie daher bitte mehr Zeit ein"),
            Effect::SignificantDelays
        );
        assert_eq!(effect_of("Verzögerungen im Betrieb"), Effect::SignificantDelays);
        assert_eq!(
            effect_of("Weichen Sie bitte auf die U6 aus"),
            Effect::ReducedService
        );
        assert_eq!(effect_of("Betrieb ab Schottentor"), Effect::ReducedService);
        assert_eq!(effect_of("Betrieb nur bis Heiligenstadt"), Effect::ReducedService);
        assert_eq!(
            effect_of("Der Betrieb ist derzeit eingestellt"),
            Effect::NoService
        );
        assert_eq!(
            effect_of("Die Züge halten nicht in Spittelau"),
            Effect::NoService
        );
        assert_eq!(
            effect_of("Die Busse halten bei der Ersatzhaltestelle"),
            Effect::NoService
        );
        assert_eq!(
            effect_of("Ein Zug ist an der Weiterfahrt gehindert"),
            Effect::NoService
        );
        assert_eq!(
            effect_of("Haltestellen können nicht eingehalten werden"),
            Effect::StopMoved
        );
    }

    #[test]
    fn earlier_cause_rule_wins_on_overlap() {
        // "Bauarbeiten" precedes "Fahrtbehinderung" in the table.
        let (cause, _) = classify("Bauarbeiten", "Fahrtbehinderung im Bereich");
        assert_eq!(cause, Cause::Construction);
    }

    #[test]
    fn earlier_effect_rule_wins_on_overlap() {
        // "Verspätungen" precedes "Weichen Sie" in the table.
        let (_, effect) = classify("Verspätungen", "Weichen Sie bitte aus");
        assert_eq!(effect, Effect::SignificantDelays);
    }

    #[test]
    fn cause_and_effect_are_independent() {
        let (cause, effect) = classify("Fahrtbehinderung", "");
        assert_eq!(cause, Cause::OtherCause);
        assert_eq!(effect, Effect::ReducedService);
    }

    #[test]
    fn case_sensitivity() {
        // "unfall" folds case, so the compound "Verkehrsunfall" matches.
        assert_eq!(cause_of("VERKEHRSUNFALL"), Cause::Accident);
        // "Streik" does not fold case.
        assert_eq!(cause_of("streik"), Cause::UnknownCause);
        // "technisch" folds case.
        assert_eq!(cause_of("Technischer Defekt"), Cause::TechnicalProblem);
    }

    #[test]
    fn classifier_matches_across_title_and_description() {
        // The needle may sit entirely in the description.
        let (cause, _) = classify("U4", "Wegen Bauarbeiten kein Betrieb");
        assert_eq!(cause, Cause::Construction);
    }

    #[test]
    fn unmatched_text_falls_back_to_unknown() {
        let (cause, effect) = classify("Information", "Sonderfahrplan am Feiertag");
        assert_eq!(cause, Cause::UnknownCause);
        assert_eq!(effect, Effect::UnknownEffect);
    }

    #[test]
    fn maintenance_outranks_construction_on_overlap() {
        // "Wartung" precedes "Bauarbeiten" in the table, and both rules see
        // the concatenated text, so the description's needle wins here.
        let (cause, effect) = classify("Bauarbeiten", "Wartungsarbeiten");
        assert_eq!(cause, Cause::Maintenance);
        assert_eq!(effect, Effect::UnknownEffect);
    }
}
