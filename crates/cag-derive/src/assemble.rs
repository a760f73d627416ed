//! Per-encounter derivation driver.
//!
//! [`derive_encounter`] is a pure function of one [`Encounter`]; the batch
//! map shares no state between encounters, so it may run on the rayon pool
//! and still return records in input order.

use cag_model::{DeriveOptions, DerivedRecord, Encounter};
use rayon::prelude::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info, warn};

use crate::complexity::evaluate_complex_pci;
use crate::lesion::extract_segment_types;
use crate::payload::parse_payload;
use crate::stents::extract_interventions;
use crate::vessel::{categorize_vessel_disease, determine_anatomical_dx};

/// Derives the summary record for one encounter.
pub fn derive_encounter(encounter: &Encounter) -> DerivedRecord {
    let (payload, payload_error) = parse_payload(encounter.review.as_ref());
    let mut diagnostics = Vec::new();
    if let Some(err) = payload_error {
        warn!(line = encounter.line, error = %err, "review payload replaced with empty object");
        diagnostics.push(err.to_string());
    }
    let review = &payload.review;
    let (cag, pci) = (payload.cag, payload.pci);

    let segment_codes = extract_segment_types(review.coronary_angiography.as_ref());
    let interventions = extract_interventions(review, cag, pci);

    let lesion_codes: Vec<&str> = segment_codes.iter().map(|s| s.code.as_str()).collect();
    let territories = categorize_vessel_disease(&lesion_codes, &interventions.previous_stent_codes);
    let anatomical_dx = determine_anatomical_dx(&territories);
    let complexity = evaluate_complex_pci(pci, &interventions);

    let lesion_b2c_num = segment_codes
        .iter()
        .filter(|s| s.lesion_type.is_complex())
        .count();

    debug!(
        line = encounter.line,
        cag,
        pci,
        lesions = segment_codes.len(),
        anatomical_dx = %anatomical_dx,
        complex_pci = %complexity.complex_pci,
        "derived encounter"
    );

    DerivedRecord {
        patient_number: encounter.patient_number.clone(),
        sex: encounter.sex.clone(),
        age: encounter.age.clone(),
        date_of_angiography: encounter.date_of_angiography.clone(),
        review: payload.object,
        cag,
        segment_codes_of_previous_stents: interventions.previous_stent_codes,
        lesion_total_num: segment_codes.len(),
        lesion_b2c_num,
        segment_codes,
        vessel_disease: territories.into_iter().collect(),
        anatomical_dx,
        pci,
        lengths_of_current_stents: interventions.current_stent_lengths,
        segment_codes_of_current_stents: interventions.current_stent_codes,
        segment_codes_of_deb_dcb: interventions.deb_dcb_codes,
        segment_codes_of_thrombus_aspiration: interventions.thrombus_aspiration_codes,
        segment_codes_of_kissing: Vec::new(),
        complexity,
        previous_stent: interventions.previous_stent,
        current_stent: interventions.current_stent,
        diagnostics,
    }
}

/// Derives every encounter, preserving input order.
pub fn derive_batch(encounters: &[Encounter], options: &DeriveOptions) -> Vec<DerivedRecord> {
    let records: Vec<DerivedRecord> = if options.parallel {
        encounters.par_iter().map(derive_encounter).collect()
    } else {
        encounters.iter().map(derive_encounter).collect()
    };
    let fallbacks = records.iter().filter(|r| !r.diagnostics.is_empty()).count();
    info!(
        encounters = records.len(),
        fallbacks,
        parallel = options.parallel,
        "derivation complete"
    );
    records
}
