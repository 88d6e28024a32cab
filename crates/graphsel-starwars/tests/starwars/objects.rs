use chrono::{TimeZone, Utc};
use graphsel_sdk::{DecodeError, Selection};
use graphsel_starwars::enums::{Episode, Language};
use graphsel_starwars::inputs::Greeting;
use graphsel_starwars::objects::{
    Human, HumanFields, Mutation, MutationFields, Query, QueryFields, Subscription,
    SubscriptionFields,
};
use graphsel_starwars::scalars::DateTime;
use serde_json::json;
use super::{droid_card, human_card, DroidCard, HumanCard};

fn human_by_id(id: &'static str) -> Selection<Option<HumanCard>, Query> {
    Selection::new(move |set| set.human(id.to_string(), human_card().nullable()))
}

#[test]
fn object_selection_requests_fields_in_call_order() {
    assert_eq!(human_card().render(), "{ name homePlanet }");
}

#[test]
fn query_document_carries_arguments() {
    assert_eq!(
        human_by_id("1000").document(None),
        r#"query { human(id: "1000") { name homePlanet } }"#
    );
    assert_eq!(
        human_by_id("1000").document(Some("Luke")),
        r#"query Luke { human(id: "1000") { name homePlanet } }"#
    );
}

#[test]
fn decodes_nested_object() {
    let data = json!({
        "human": {"name": "Luke Skywalker", "homePlanet": "Tatooine"}
    });
    assert_eq!(
        human_by_id("1000").decode(&data).unwrap(),
        Some(HumanCard {
            name: "Luke Skywalker".into(),
            home_planet: Some("Tatooine".into()),
        })
    );
}

#[test]
fn nullable_field_decodes_null_as_none() {
    let data = json!({"human": null});
    assert_eq!(human_by_id("404").decode(&data).unwrap(), None);
}

#[test]
fn non_null_or_fail_turns_null_into_error_with_path() {
    let strict: Selection<DroidCard, Query> = Selection::new(|set| {
        set.droid("2001".to_string(), droid_card().non_null_or_fail())
    });
    assert_eq!(
        strict.render(),
        r#"{ droid(id: "2001") { name primaryFunction } }"#
    );

    let err = strict.decode(&json!({"droid": null})).unwrap_err();
    assert_eq!(err.path(), vec!["droid"]);
    assert_eq!(err.root_cause(), &DecodeError::MissingValue);

    let droid = strict
        .decode(&json!({"droid": {"name": "R2-D2", "primaryFunction": "Astromech"}}))
        .unwrap();
    assert_eq!(droid.primary_function, "Astromech");
}

#[test]
fn empty_selection_asks_for_typename_only() {
    let exists: Selection<bool, Query> = Selection::new(|set| {
        let found = set.human(
            "1000".to_string(),
            Selection::<(), Human>::empty().nullable(),
        )?;
        Ok(found.is_some())
    });
    assert_eq!(
        exists.document(None),
        r#"query { human(id: "1000") { __typename } }"#
    );
    assert!(exists
        .decode(&json!({"human": {"__typename": "Human"}}))
        .unwrap());
    assert!(!exists.decode(&json!({"human": null})).unwrap());
}

#[test]
fn enum_list_decodes_and_rejects_unknown_values() {
    let episodes: Selection<Vec<Episode>, Human> = Selection::new(|set| set.appears_in());
    assert_eq!(
        episodes.decode(&json!({"appearsIn": ["NEWHOPE", "JEDI"]})).unwrap(),
        vec![Episode::Newhope, Episode::Jedi]
    );

    let err = episodes
        .decode(&json!({"appearsIn": ["EMPIRE", "PHANTOM"]}))
        .unwrap_err();
    assert_eq!(err.path(), vec!["appearsIn", "1"]);
    assert_eq!(
        err.root_cause(),
        &DecodeError::UnknownEnumValue {
            enum_name: "Episode".into(),
            value: "PHANTOM".into(),
        }
    );
}

#[test]
fn enum_helpers() {
    assert_eq!(Episode::VALUES.len(), 3);
    assert_eq!(Episode::Empire.as_str(), "EMPIRE");
    assert_eq!(Episode::Jedi.to_string(), "JEDI");
}

#[test]
fn input_object_skips_absent_fields() {
    let greet = |input: Option<Greeting>| -> Selection<String, Query> {
        Selection::new(move |set| set.greeting(input.clone()))
    };

    let full = greet(Some(Greeting {
        language: Some(Language::Sl),
        name: "Luke".into(),
    }));
    assert_eq!(
        full.render(),
        r#"{ greeting(input: {language: SL, name: "Luke"}) }"#
    );

    let partial = greet(Some(Greeting {
        language: None,
        name: "Leia".into(),
    }));
    assert_eq!(partial.render(), r#"{ greeting(input: {name: "Leia"}) }"#);

    assert_eq!(greet(None).render(), "{ greeting }");
}

#[test]
fn mock_of_a_query_never_fails() {
    let selection = human_by_id("1000");
    assert_eq!(selection.mock().unwrap(), None);
    let strict: Selection<HumanCard, Query> =
        Selection::new(|set| set.human("1".to_string(), human_card().non_null_or_fail()));
    assert_eq!(
        strict.mock().unwrap(),
        HumanCard {
            name: String::new(),
            home_planet: None,
        }
    );
}

#[test]
fn missing_non_null_leaf_reports_full_path() {
    let err = human_by_id("1000")
        .decode(&json!({"human": {"homePlanet": "Tatooine"}}))
        .unwrap_err();
    assert_eq!(err.path(), vec!["human", "name"]);
}

#[test]
fn mapped_scalar_decodes_to_its_rust_type() {
    let now: Selection<DateTime, Query> = Selection::new(|set| set.time());
    assert_eq!(now.document(None), "query { time }");
    assert_eq!(
        now.decode(&json!({"time": "1980-05-21T12:30:00Z"})).unwrap(),
        Utc.with_ymd_and_hms(1980, 5, 21, 12, 30, 0).unwrap()
    );

    let err = now.decode(&json!({"time": "yesterday"})).unwrap_err();
    assert_eq!(err.path(), vec!["time"]);
    assert!(matches!(
        err.root_cause(),
        DecodeError::InvalidScalar { type_name: "DateTime", .. }
    ));
}

#[test]
fn created_at_is_required_on_human() {
    let created: Selection<DateTime, Human> = Selection::new(|set| set.created_at());
    let err = created.decode(&json!({"infoURL": null})).unwrap_err();
    assert_eq!(err.path(), vec!["createdAt"]);
    assert_eq!(err.root_cause(), &DecodeError::MissingValue);
}

#[test]
fn root_types_pick_their_operation_keyword() {
    let mutate: Selection<bool, Mutation> = Selection::new(|set| set.mutate());
    assert_eq!(mutate.document(None), "mutation { mutate }");
    assert!(mutate.decode(&json!({"mutate": true})).unwrap());

    let number: Selection<i32, Subscription> = Selection::new(|set| set.number());
    assert_eq!(number.document(Some("Ticks")), "subscription Ticks { number }");
}
