use brandkit_gen::{gen_test::MockGenerator, GeneratorError};
use brandkit_pipeline::{
    dangling_references, Artifact, AssetContent, AssetKind, AssetStatus, BrandscriptAnswers,
    BusinessId, BusinessInfoAnswers, ContentStore, MemoryStore, Pipeline, PipelineError,
};
use std::sync::Arc;

fn business() -> BusinessId {
    BusinessId::from("biz-1")
}

fn brandscript_answers() -> BrandscriptAnswers {
    BrandscriptAnswers {
        company_name: "Acme Plumbing".to_string(),
        products_services: "Residential plumbing".to_string(),
        target_audience: "Homeowners".to_string(),
        main_problem: "Leaky pipes ruin weekends".to_string(),
        solution: "Same-day repair".to_string(),
        differentiation: "Flat pricing".to_string(),
        authority: "4000 five-star reviews".to_string(),
        steps: "Call, book, relax".to_string(),
    }
}

fn business_info_answers() -> BusinessInfoAnswers {
    BusinessInfoAnswers {
        services: "Drain cleaning, leak repair".to_string(),
        excluded_services: "Gas lines".to_string(),
        locations: "Austin metro".to_string(),
        excluded_locations: "Outside the loop".to_string(),
        priority_service: "Leak repair".to_string(),
        phone_number: "555-0100".to_string(),
        address: "1 Main St".to_string(),
    }
}

fn harness() -> (Arc<MockGenerator>, Arc<MemoryStore>, Pipeline) {
    let generator = Arc::new(MockGenerator::new());
    let store = Arc::new(MemoryStore::new());
    let pipeline = Pipeline::new(generator.clone(), store.clone());
    (generator, store, pipeline)
}

async fn seed_brandscript(
    generator: &MockGenerator,
    pipeline: &Pipeline,
    narrative: &str,
) -> Artifact {
    generator.enqueue_text(narrative);
    pipeline
        .create_brandscript(business(), brandscript_answers())
        .await
        .unwrap()
}

#[tokio::test]
async fn brandscript_stores_narrative_verbatim() {
    let (generator, _, pipeline) = harness();
    let artifact = seed_brandscript(&generator, &pipeline, "THE NARRATIVE\nwith lines").await;

    assert_eq!(artifact.status, AssetStatus::Complete);
    assert_eq!(artifact.kind(), AssetKind::Brandscript);
    assert!(artifact.referenced_assets.is_empty());
    match &artifact.content {
        AssetContent::Brandscript { narrative, answers } => {
            assert_eq!(narrative, "THE NARRATIVE\nwith lines");
            assert_eq!(answers, &brandscript_answers());
        }
        other => panic!("unexpected content: {other:?}"),
    }

    // The prompt carried every answer.
    let prompt = &generator.requests()[0].prompt;
    assert!(prompt.contains("Acme Plumbing"));
    assert!(prompt.contains("Flat pricing"));
}

#[tokio::test]
async fn empty_answer_field_fails_before_any_generation() {
    let (generator, store, pipeline) = harness();
    let mut answers = brandscript_answers();
    answers.main_problem = String::new();

    let error = pipeline
        .create_brandscript(business(), answers)
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::Validation(_)));
    assert_eq!(generator.request_count(), 0);
    assert!(store.list_by_business(&business()).await.unwrap().is_empty());
}

#[tokio::test]
async fn business_info_is_stored_without_generation() {
    let (generator, _, pipeline) = harness();
    let artifact = pipeline
        .create_business_info(business(), business_info_answers())
        .await
        .unwrap();

    assert_eq!(generator.request_count(), 0);
    assert_eq!(artifact.kind(), AssetKind::BusinessInfo);
    assert_eq!(
        artifact.content,
        AssetContent::BusinessInfo {
            answers: business_info_answers()
        }
    );
}

#[tokio::test]
async fn personas_prompt_includes_stored_narrative_unmodified() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "A VERY SPECIFIC NARRATIVE").await;
    let info = pipeline
        .create_business_info(business(), business_info_answers())
        .await
        .unwrap();

    generator.enqueue_text("### Persona 1: Sarah\n**Goals:**\n- Grow\n");
    let personas = pipeline
        .create_customer_personas(business(), vec![brandscript.id.clone(), info.id.clone()])
        .await
        .unwrap();

    let request = &generator.requests()[1];
    assert!(request.prompt.contains("A VERY SPECIFIC NARRATIVE"));
    assert!(request.prompt.contains("Drain cleaning, leak repair"));

    // References are ordered brandscript first, business info second.
    assert_eq!(personas.referenced_assets, vec![brandscript.id, info.id]);
    match &personas.content {
        AssetContent::CustomerPersonas { personas, raw } => {
            assert_eq!(personas[0].name, "Sarah");
            assert_eq!(personas[0].sections[0].title, "Goals");
            assert!(raw.contains("### Persona 1"));
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn selection_order_breaks_ties_between_brandscripts() {
    let (generator, _, pipeline) = harness();
    let first = seed_brandscript(&generator, &pipeline, "FIRST NARRATIVE").await;
    let second = seed_brandscript(&generator, &pipeline, "SECOND NARRATIVE").await;

    generator.enqueue_text("### Persona 1: A\n");
    let personas = pipeline
        .create_customer_personas(business(), vec![second.id.clone(), first.id])
        .await
        .unwrap();

    assert!(generator.requests()[2].prompt.contains("SECOND NARRATIVE"));
    assert_eq!(personas.referenced_assets, vec![second.id]);
}

#[tokio::test]
async fn problem_statements_require_a_brandscript_selection() {
    let (generator, store, pipeline) = harness();
    let info = pipeline
        .create_business_info(business(), business_info_answers())
        .await
        .unwrap();

    // No brandscript among the selected dependencies.
    let error = pipeline
        .create_problem_statements(business(), vec![])
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        PipelineError::MissingDependency(AssetKind::Brandscript)
    ));

    // Business info is not a kind problem statements may reference at all.
    let error = pipeline
        .create_problem_statements(business(), vec![info.id])
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::DependencyMismatch(_)));

    assert_eq!(generator.request_count(), 0);
    assert_eq!(store.list_by_business(&business()).await.unwrap().len(), 1);
}

#[tokio::test]
async fn problem_statements_normalize_fenced_generator_output() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "n").await;

    generator.enqueue_text(
        "```json\n[\n\"I keep falling behind\",\n\"I'm wasting money on ads\",\n]\n```",
    );
    let artifact = pipeline
        .create_problem_statements(business(), vec![brandscript.id.clone()])
        .await
        .unwrap();

    assert_eq!(artifact.referenced_assets, vec![brandscript.id]);
    assert_eq!(
        artifact.content,
        AssetContent::ProblemStatements {
            statements: vec![
                "I keep falling behind".to_string(),
                "I'm wasting money on ads".to_string(),
            ]
        }
    );
    // Personas were not selected: the prompt falls back to the brandscript
    // framing.
    assert!(generator.requests()[1]
        .prompt
        .contains("target market described in the brandscript"));
}

#[tokio::test]
async fn unusable_statement_output_is_stored_as_an_empty_list() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "n").await;

    generator.enqueue_text("   \n  ");
    let artifact = pipeline
        .create_problem_statements(business(), vec![brandscript.id])
        .await
        .unwrap();

    // Soft failure: the artifact exists, callers see zero statements.
    assert_eq!(
        artifact.content,
        AssetContent::ProblemStatements { statements: vec![] }
    );
}

#[tokio::test]
async fn generation_failure_persists_nothing() {
    let (generator, store, pipeline) = harness();
    generator.enqueue_error(GeneratorError::NoContent("mock"));

    let error = pipeline
        .create_brandscript(business(), brandscript_answers())
        .await
        .unwrap_err();
    assert!(matches!(
        error,
        PipelineError::Generation(GeneratorError::NoContent("mock"))
    ));
    assert!(store.list_by_business(&business()).await.unwrap().is_empty());
}

#[tokio::test]
async fn deleting_a_referenced_artifact_leaves_a_dangling_reference() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "n").await;

    generator.enqueue_text("### Persona 1: A\n");
    let personas = pipeline
        .create_customer_personas(business(), vec![brandscript.id.clone()])
        .await
        .unwrap();

    pipeline.delete_artifact(&brandscript.id).await.unwrap();

    // The dependent is still retrievable, its reference now dangles.
    let survivor = pipeline.get_artifact(&personas.id).await.unwrap();
    assert_eq!(survivor.referenced_assets, vec![brandscript.id.clone()]);

    let pool = pipeline.list_artifacts(&business()).await.unwrap();
    assert_eq!(dangling_references(&survivor, &pool), vec![brandscript.id]);
}

#[tokio::test]
async fn updating_business_info_never_generates_and_touches_nothing_else() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "n").await;
    let info = pipeline
        .create_business_info(business(), business_info_answers())
        .await
        .unwrap();
    let calls_before = generator.request_count();

    let mut edited = business_info_answers();
    edited.priority_service = "Drain cleaning".to_string();
    let updated = pipeline
        .update_business_info(&info.id, edited.clone())
        .await
        .unwrap();

    assert_eq!(generator.request_count(), calls_before);
    assert_eq!(updated.id, info.id);
    assert_eq!(
        updated.content,
        AssetContent::BusinessInfo { answers: edited }
    );
    assert_eq!(
        pipeline.get_artifact(&brandscript.id).await.unwrap().content,
        brandscript.content
    );
}

#[tokio::test]
async fn updating_a_brandscript_regenerates_in_place() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "OLD NARRATIVE").await;

    let mut edited = brandscript_answers();
    edited.solution = "Next-day repair".to_string();
    generator.enqueue_text("NEW NARRATIVE");
    let updated = pipeline
        .update_brandscript(&brandscript.id, edited)
        .await
        .unwrap();

    assert_eq!(updated.id, brandscript.id);
    assert!(updated.referenced_assets.is_empty());
    match updated.content {
        AssetContent::Brandscript { narrative, answers } => {
            assert_eq!(narrative, "NEW NARRATIVE");
            assert_eq!(answers.solution, "Next-day repair");
        }
        other => panic!("unexpected content: {other:?}"),
    }
}

#[tokio::test]
async fn updating_the_wrong_kind_is_a_validation_error() {
    let (generator, _, pipeline) = harness();
    let brandscript = seed_brandscript(&generator, &pipeline, "n").await;

    let error = pipeline
        .update_business_info(&brandscript.id, business_info_answers())
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::Validation(_)));
}

#[tokio::test]
async fn listing_returns_newest_first_per_business() {
    let (generator, _, pipeline) = harness();
    let first = seed_brandscript(&generator, &pipeline, "n1").await;
    let second = pipeline
        .create_business_info(business(), business_info_answers())
        .await
        .unwrap();

    // Another business's artifacts stay out of the listing.
    pipeline
        .create_business_info(BusinessId::from("biz-2"), business_info_answers())
        .await
        .unwrap();

    let listed = pipeline.list_artifacts(&business()).await.unwrap();
    assert_eq!(
        listed.iter().map(|a| a.id.clone()).collect::<Vec<_>>(),
        vec![second.id, first.id]
    );
}

#[tokio::test]
async fn foreign_business_selection_is_a_dependency_mismatch() {
    let (generator, _, pipeline) = harness();
    let foreign = {
        generator.enqueue_text("n");
        pipeline
            .create_brandscript(BusinessId::from("biz-2"), brandscript_answers())
            .await
            .unwrap()
    };

    let error = pipeline
        .create_customer_personas(business(), vec![foreign.id])
        .await
        .unwrap_err();
    assert!(matches!(error, PipelineError::DependencyMismatch(_)));
}
