//! The schema descriptor embedded in every language-model prompt.
//!
//! Hand-authored description of node labels, their properties and the
//! relationship patterns of the phenotype graph. The text is reproduced
//! verbatim from the curated prompt, typos included.

/// Node labels, properties and relationships of the phenotype graph.
pub const SCHEMA_DESCRIPTOR: &str = r##" 

PID and CID are global ID system that spans across the databasaes. Listed below are the node labels and their properties:

        {
            phenotype: a master list of all the phenotypes across all the databases (Sentinel, HDRUK, CPRD, OHDSI, PheKb)
            phenotype_properties: {
                "phenotypes": name of the phenotype,
                "sentinel_PID": associated Sentinel PID
                "hdruk_PID": string of an array of associated HDRUK PIDs,
                "cprd_PID": associated CPRD PID,
                "ohdsi_PID": associated OHDSI PID,
                "phekb_PID": associated PheKb PID
            }

            sentinel_detail: details of the phenotype in the Sentinel database,
            sentinel_detail_properties: {
                "outcome": string, the specific outcome/phenotype being analyzed,
                "algorithm_to_define_outcome": string, description of how codes were used to define outcome/phenotype,
                "description": string, detailed information and reference link for the algorithm,
                "PID": string, unique identifier for the Sentinel phenotype,
                "query_end_date": date,
                "title": string, title of the study or analysis used to compule codes,
                "request_send_date": date, date when the data request was sent,
                "request_id": array of strings, identifiers for the data request of the report,
                "query_start_date": date, start date for the data query period
            }

            sentinel_concept: concept used to define Sentinel phenotype/outcome,
            sentinel_concept_properties: {
                "code": string, medical code associated with the concept,
                "code_type": array of strings, types of medical codes like CPT-4 and RE,
                "code_category": array of strings, category of the medical code like 'Procedure' or 'Diagnosis',
                "principal_diagnosis": array of strings, primary diagnosis information,
                "description": string, name of the concept,
                "request_id": array of arrays of strings, identifiers for the data request,
                "PIDs": array of strings, unique identifiers for the sentinel_details its associated with,
                "outcome": array of strings, the specific outcomes/phenotypes being analyzed in gathering the codes,
                "CID": string, unique identifier for the Sentinel concept,
                "care_setting": array of strings, types of care settings,
            }

            cprd_detail: details of the phenotype in the CPRD database,
            cprd_detail_properties: {
                "disease": string, name of the disease/phenotype,
                "PID": string, unique identifier for the CPRD phenotype,
                "disease_num": integer, numerical identifier for the disease unique to CPRD
            }

            cprd_concept: concept used to define CPRD phenotype/disease,
            cprd_concept_properties: {
                "system_num": array of integers, system number associated with the concept,
                "mapping": array of strings, type of code mapping used,
                "disease": array of strings, name of the disease that the code is associated with,
                "medcode": array of floats, medical code associated with the concept,
                "PIDs": array of strings, unique identifiers for the cprd_details its associated with,
                "snomedctconceptid": array of floats, SNOMED CT concept identifier,
                "medcodeid": array of floats, medical code identifier,
                "descr": string, name of the concept,
                "system": array of strings, system classification,
                "read_code": string, Read code associated with the concept,
                "snomedctdescriptionid": array of floats, SNOMED CT description identifier,
                "disease_num": array of integers, numerical identifier for the disease,
                "category": array of strings, category of the diagnosis,
                "CID": string, unique identifier for the CPRD concept
            }

            hdruk_detail: details of the phenotype in the HDRUK database,
            hdruk_detail_properties: {
                "owner": string, owner of the dataset,
                "event_date_end": date, end date of the event,
                "created": datetime, creation timestamp of the record,
                "author": string, authors of the study,
                "sex": array of strings, sex of the subjects,
                "PID": string, unique identifier for the HDRUK phenotype,
                "event_date_start": date, start date of the event,
                "world_access": integer, access level for the world,
                "type": array of strings, type of disease or syndrome,
                "data_sources": array of strings, sources of the data,
                "group_access": integer, access level for the group,
                "coding_system": array of strings, coding system used,
                "collections": array of strings, collections the dataset belongs to,
                "name": string, name of the phenotype,
                "phenotype_version_id": integer, version identifier for the phenotype,
                "phenotype_id": string, identifier for the report,
                "definition": string, definition of the phenotype,
                "updated": datetime, timestamp of the last update,
                "status": integer, status of the phenotype,
                "publications": array of dictionaries, publications related to the phenotype
            }

            ohdsi_detail: details of the phenotype in the OHDSI database,
            ohdsi_detail_properties: {
                "criteriaLocationVisitSourceConceptPrimaryCriteria": integer, primary criteria for visit source concept,
                "addedDate": date, date when the record was added,
                "hasWashoutInText": integer, indicator if washout period is mentioned in the text,
                "domainConditionOccurrence": integer, indicator for condition occurrence domain,
                "contributorOrcIds": array of strings, ORCID IDs of the contributors,
                "updatedDate": date, date when the record was last updated,
                "domainDeviceExposure": integer, indicator for device exposure domain,
                "criteriaLocationConditionSourceConceptInclusionRules": integer, inclusion rules for condition source concept,
                "criteriaLocationConditionSourceConceptPrimaryCriteria": integer, primary criteria for condition source concept,
                "numberOfInclusionRules": integer, number of inclusion rules,
                "domainVisitOccurrence": integer, indicator for visit occurrence domain,
                "isCirceJson": boolean, indicator if the data is in Circe JSON format,
                "censorWindowStartDate": integer, start date for the censor window,
                "criteriaLocationProviderSpecialtyInclusionRules": integer, inclusion rules for provider specialty,
                "initialEventRestrictionAdditionalCriteriaLimit": string, limit for additional criteria on initial event restriction,
                "demographicCriteriaGender": integer, indicator for gender demographic criteria,
                "domainProcedureOccurrence": integer, indicator for procedure occurrence domain,
                "isReferenceCohort": boolean, indicator if the cohort is a reference cohort,
                "censorWindowEndDate": integer, end date for the censor window,
                "criteriaLocationProcedureSourceConceptPrimaryCriteria": integer, primary criteria for procedure source concept,
                "domainObservation": integer, indicator for observation domain,
                "continousObservationWindowPrior": integer, prior continuous observation window,
                "domainDeath": integer, indicator for death domain,
                "domainMeasurement": integer, indicator for measurement domain,
                "inclusionRuleQualifyingEventLimit": string, limit for qualifying event in inclusion rules,
                "exitDateOffSet": float, offset for exit date,
                "collapseSettingsType": string, type of collapse settings,
                "exitDateOffSetField": string, field for exit date offset,
                "numberOfCohortEntryEvents": integer, number of cohort entry events,
                "criteriaLocationAgePrimaryCriteria": integer, primary criteria for age,
                "criteriaLocationGenderAdditionalCriteria": integer, additional criteria for gender,
                "criteriaLocationMeasurementSourceConceptPrimaryCriteria": integer, primary criteria for measurement source concept,
                "modifiedDate": date, date when the record was last modified,
                "criteriaLocationVisitTypePrimaryCriteria": integer, primary criteria for visit type,
                "numberOfDomainsInEntryEvents": integer, number of domains in entry events,
                "domainDrugEra": integer, indicator for drug era domain,
                "criteriaLocationAgeInclusionRules": integer, inclusion rules for age,
                "restrictedByVisit": boolean, indicator if restricted by visit,
                "status": string, current status of the record,
                "hashTag": array of strings, hashtags associated with the record,
                "cohortId": integer, unique identifier for the cohort within the OHDSI database,
                "contributorOrganizations": array of strings, organizations of the contributors,
                "initialEventRestrictionAdditionalCriteria": boolean, additional criteria for initial event restriction,
                "demographicCriteriaAge": integer, indicator for age demographic criteria,
                "useOfObservationPeriodInclusionRule": integer, use of observation period in inclusion rule,
                "logicDescription": string, description of the logic,
                "cohortName": string, name of the cohort/phenotype,
                "criteriaLocationGenderInclusionRules": integer, inclusion rules for gender,
                "criteriaLocationFirstInclusionRules": integer, first inclusion rules,
                "criteriaLocationGenderPrimaryCriteria": integer, primary criteria for gender,
                "collapseEraPad": integer, era padding for collapse,
                "criteriaLocationProviderSpecialtyPrimaryCriteria": integer, primary criteria for provider specialty,
                "cohortNameFormatted": string, formatted name of the cohort/phenotype,
                "continousObservationWindowPost": integer, post continuous observation window,
                "exitStrategy": string, strategy for exit,
                "eventCohort": integer, event cohort,
                "lastModifiedBy": integer, ID of the last modifier,
                "initialEventLimit": string, limit for initial event,
                "librarian": string, librarian's email,
                "PID": string, unique identifier for the OHDSI phenotype,
                "domainsInEntryEvents": array of strings, domains in entry events,
                "domainObservationPeriod": integer, indicator for observation period domain,
                "demographicCriteria": integer, indicator for demographic criteria,
                "criteriaLocationAgeAdditionalCriteria": integer, additional criteria for age,
                "peerReviewerOrcIds": integer, ORCID IDs of the peer reviewers,
                "ohdsiForumPost": string, link to the OHDSI forum post,
                "createdDate": date, date when the record was created,
                "exitSurveillanceWindow": integer, surveillance window for exit,
                "recommendedReferentConceptIds": array of strings, recommended referent concept IDs,
                "contributors": array of strings, names of the contributors,
                "numberOfConceptSets": integer, number of concept sets,
                "criteriaLocationFirstPrimaryCriteria": integer, first primary criteria,
                "domainDrugExposure": integer, indicator for drug exposure domain
            }

            ohdsi_concept: concept used to define OHDSI cohort/phenotype
            ohdsi_concept_properties: {
                "cohortName": array of strings, names of the associated cohorts/phenotypes,
                "cohortId": array of integers, identifiers for the associated cohorts/phenotypes,
                "ConceptId": integer, unique identifier for the concept within the OHDSI database,
                "ConceptName": string, name of the concept,
                "VocabularyId": array of strings, vocabulary identifiers,
                "ConceptCode": array of strings, codes associated with the concept,
                "ok": boolean, status flag,
                "PIDs": array of strings, unique identifiers for the ohdsi_details its associated with,
                "CID": string, unique identifier for the concept
            }

            phekb_detail: detail of the phenotype in the PheKB database,
            phekb_detail_properties: {
                "date_created": date, date when the record was created,
                "description": string, detailed description of the phenotype,
                "PID": string, unique identifier for the PheKB phenotype,
                "genders": array of strings, genders applicable to the phenotype,
                "phenotype_attributes": array of strings, attributes associated with the phenotype,
                "type_of_phenotype": string, type of the phenotype,
                "races": array of strings, races applicable to the phenotype,
                "name": string, name of the phenotype,
                "phenotype_id": integer, unique identifier for the phenotype within the PheKB database,
                "files": array of strings, URLs to related files,
                "ages": array of strings, age groups applicable to the phenotype,
                "status": string, current status of the phenotype,
                "authors": array of strings, authors of the study
            }

            phekb_concept: concept used to define PheKB phenotype,
            phekb_concept_properties: {
                "name": string, name of the associated phenotype,
                "phenotype_id": integer, unique identifier for the phenotype,
                "files": array of strings, URLs to related files that define phenotype and associated concepts,
                "phenotype_attributes": array of strings, attributes associated with the phenotype,
                "PIDs": array of strings, unique identifiers for the phekb_details its associated with,
                "CID": string, unique identifier for the concept
            }
        }



        The relationships are:

        (:phenotype)-[:DETAILS_ARE]->(:sentinel_detail),
        (:phenotype)-[:DETAILS_ARE]->(:cprd_detail),
        (:phenotype)-[:DETAILS_ARE]->(:hdruk_detail),
        (:phenotype)-[:DETAILS_ARE]->(:ohdsi_detail),
        (:phenotype)-[:DETAILS_ARE]->(:phekb_detail),
        (:sentinel_detail)-[:HAS_CONCEPT]->(:sentinel_concept),
        (:cprd_detail)-[:HAS_CONCEPT]->(:cprd_concept),
        (:ohdsi_detail)-[:HAS_CONCEPT]->(:ohdsi_concept),
        (:phekb_detail)-[:HAS_CONCEPT]->(:phekb_concept)

        Note that hdruk_detail does NOT have a relationship with hdruk_concept and hdruk_concept doesn't exist. All concept/code related questions should exclude hdruk.


"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Source;

    #[test]
    fn test_descriptor_names_every_label() {
        for source in Source::ALL {
            assert!(SCHEMA_DESCRIPTOR.contains(source.detail_label()));
            assert!(SCHEMA_DESCRIPTOR.contains(source.pid_property()));
            if let Some(label) = source.concept_label() {
                assert!(SCHEMA_DESCRIPTOR.contains(&format!(
                    "(:{})-[:HAS_CONCEPT]->(:{})",
                    source.detail_label(),
                    label
                )));
            }
        }
    }

    #[test]
    fn test_descriptor_excludes_hdruk_concepts() {
        assert!(SCHEMA_DESCRIPTOR.contains("All concept/code related questions should exclude hdruk."));
        assert!(!SCHEMA_DESCRIPTOR.contains("hdruk_concept_properties"));
    }
}
