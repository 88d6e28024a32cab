use chrono::{TimeZone, Utc};
use graphsel_sdk::{DecodeError, Discriminator, Selection};
use graphsel_starwars::enums::Episode;
use graphsel_starwars::interfaces::{Character, CharacterFields, CharacterTypename};
use graphsel_starwars::objects::{Query, QueryFields};
use graphsel_starwars::unions::{CharacterUnion, CharacterUnionFields, CharacterUnionTypename};
use serde_json::json;
use super::{droid_card, human_card, DroidCard, HumanCard};

#[derive(Debug, Clone, PartialEq)]
enum Card {
    Human(HumanCard),
    Droid(DroidCard),
}

fn card() -> Selection<Card, CharacterUnion> {
    Selection::<Card, CharacterUnion>::new(|set| {
        set.on(
            human_card().map_into(Card::Human),
            droid_card().map_into(Card::Droid),
        )
    })
}

/// Maps a selection's output through `f`.
trait MapInto<T, W> {
    fn map_into<V: 'static>(self, f: fn(T) -> V) -> Selection<V, W>;
}

impl<T: 'static, W: 'static> MapInto<T, W> for Selection<T, W> {
    fn map_into<V: 'static>(self, f: fn(T) -> V) -> Selection<V, W> {
        Selection::new(move |set| {
            set.select_all(self.fields().iter().cloned());
            let value = match set.response() {
                graphsel_sdk::Response::Pending => self.mock()?,
                graphsel_sdk::Response::Resolved(data) => self.decode(data)?,
            };
            Ok(f(value))
        })
    }
}

fn search(query: &'static str) -> Selection<Vec<Card>, Query> {
    Selection::new(move |set| set.search(Some(query.to_string()), None, card().list()))
}

#[test]
fn on_requests_typename_and_one_fragment_per_type() {
    assert_eq!(
        search("sky").document(None),
        "query { search(query: \"sky\") { __typename \
         ... on Human { name homePlanet } \
         ... on Droid { name primaryFunction } } }"
    );
}

#[test]
fn defaulted_argument_is_sent_only_when_given() {
    let first_two: Selection<Vec<Card>, Query> =
        Selection::new(|set| set.search(Some("sky".to_string()), Some(2), card().list()));
    assert!(first_two
        .render()
        .starts_with("{ search(query: \"sky\", first: 2) { __typename"));
}

#[test]
fn on_dispatches_each_element_by_typename() {
    let data = json!({
        "search": [
            {"__typename": "Human", "name": "Luke Skywalker", "homePlanet": "Tatooine"},
            {"__typename": "Droid", "name": "C-3PO", "primaryFunction": "Protocol"},
        ]
    });
    assert_eq!(
        search("o").decode(&data).unwrap(),
        vec![
            Card::Human(HumanCard {
                name: "Luke Skywalker".into(),
                home_planet: Some("Tatooine".into()),
            }),
            Card::Droid(DroidCard {
                name: "C-3PO".into(),
                primary_function: "Protocol".into(),
            }),
        ]
    );
}

#[test]
fn unknown_typename_is_a_decode_error() {
    let data = json!({"search": [{"__typename": "Wookiee", "name": "Chewbacca"}]});
    let err = search("chew").decode(&data).unwrap_err();
    assert_eq!(err.path(), vec!["search", "0"]);
    assert_eq!(
        err.root_cause(),
        &DecodeError::UnknownPossibleType {
            type_name: "CharacterUnion".into(),
            typename: "Wookiee".into(),
        }
    );
}

#[test]
fn pending_on_uses_the_first_selection_mock() {
    assert_eq!(
        card().mock().unwrap(),
        Card::Human(HumanCard {
            name: String::new(),
            home_planet: None,
        })
    );
}

#[test]
fn on_single_type_returns_none_for_other_types() {
    let only_droids: Selection<Option<DroidCard>, CharacterUnion> =
        Selection::<Option<DroidCard>, CharacterUnion>::new(|set| set.on_droid(droid_card()));
    assert_eq!(
        only_droids.render(),
        "{ __typename ... on Droid { name primaryFunction } }"
    );
    assert_eq!(
        only_droids
            .decode(&json!({"__typename": "Human", "name": "Han"}))
            .unwrap(),
        None
    );
    assert_eq!(
        only_droids
            .decode(&json!({"__typename": "Droid", "name": "R2-D2", "primaryFunction": "Astromech"}))
            .unwrap()
            .map(|d| d.name),
        Some("R2-D2".to_string())
    );
}

#[test]
fn merged_holder_requests_every_leaf_per_type() {
    assert_eq!(
        CharacterUnion::selection().render(),
        "{ __typename \
         ... on Human { id name appearsIn homePlanet infoURL createdAt } \
         ... on Droid { id name appearsIn primaryFunction function } }"
    );
    assert_eq!(CharacterUnion::POSSIBLE_TYPES, &["Human", "Droid"]);
}

#[test]
fn merged_holder_fills_only_slots_of_the_resolved_type() {
    let droid = CharacterUnion::selection()
        .decode(&json!({
            "__typename": "Droid",
            "id": "2001",
            "name": "R2-D2",
            "appearsIn": ["NEWHOPE"],
            "primaryFunction": "Astromech",
        }))
        .unwrap();
    assert_eq!(
        droid,
        CharacterUnion {
            typename: CharacterUnionTypename::Droid,
            id: Some("2001".into()),
            name: Some("R2-D2".into()),
            appears_in: Some(vec![Episode::Newhope]),
            home_planet: None,
            info_url: None,
            created_at: None,
            primary_function: Some("Astromech".into()),
            function: None,
        }
    );

    // homePlanet and infoURL are nullable on Human: null and absent both
    // decode to None.
    let human = CharacterUnion::selection()
        .decode(&json!({
            "__typename": "Human",
            "id": "1002",
            "name": "Han Solo",
            "appearsIn": ["NEWHOPE", "EMPIRE"],
            "homePlanet": null,
            "createdAt": "1977-05-25T00:00:00Z",
        }))
        .unwrap();
    assert_eq!(human.typename, CharacterUnionTypename::Human);
    assert_eq!(human.home_planet, None);
    assert_eq!(human.info_url, None);
    assert_eq!(human.appears_in, Some(vec![Episode::Newhope, Episode::Empire]));
    assert_eq!(
        human.created_at,
        Some(Utc.with_ymd_and_hms(1977, 5, 25, 0, 0, 0).unwrap())
    );
    assert_eq!(human.primary_function, None);
}

#[test]
fn merged_holder_requires_fields_the_resolved_type_declares_non_null() {
    let err = CharacterUnion::selection()
        .decode(&json!({"__typename": "Droid", "id": "2001"}))
        .unwrap_err();
    assert_eq!(err.path(), vec!["name"]);
    assert_eq!(err.root_cause(), &DecodeError::MissingValue);

    let err = CharacterUnion::selection()
        .decode(&json!({
            "__typename": "Human",
            "id": "1002",
            "name": "Han Solo",
            "homePlanet": "Corellia",
            "createdAt": "1977-05-25T00:00:00Z",
        }))
        .unwrap_err();
    assert_eq!(err.path(), vec!["appearsIn"]);
    assert_eq!(err.root_cause(), &DecodeError::MissingValue);

    // Droid.function is nullable, so it may be left out.
    let droid = CharacterUnion::selection()
        .decode(&json!({
            "__typename": "Droid",
            "id": "2001",
            "name": "R2-D2",
            "appearsIn": [],
            "primaryFunction": "Astromech",
        }))
        .unwrap();
    assert_eq!(droid.function, None);
    assert_eq!(droid.appears_in, Some(Vec::new()));
}

#[test]
fn merged_holder_mock_leaves_every_slot_empty() {
    let mock = CharacterUnion::selection().mock().unwrap();
    assert_eq!(mock.typename, CharacterUnionTypename::Human);
    assert_eq!(mock.id, None);
    assert_eq!(mock.primary_function, None);
}

#[test]
fn merged_holder_rejects_mismatched_leaf() {
    let err = CharacterUnion::selection()
        .decode(&json!({
            "__typename": "Droid",
            "id": "2001",
            "name": "R2-D2",
            "appearsIn": ["JEDI"],
            "primaryFunction": 7,
        }))
        .unwrap_err();
    assert_eq!(err.path(), vec!["primaryFunction"]);
    assert!(matches!(
        err.root_cause(),
        DecodeError::TypeMismatch { expected: "string", .. }
    ));
}

#[test]
fn interface_mixes_own_fields_with_dispatch() {
    let roster: Selection<Vec<(String, CharacterTypename, Vec<String>)>, Query> =
        Selection::new(|set| {
            let entry = Selection::<(String, CharacterTypename, Vec<String>), Character>::new(|set| {
                let name = set.name()?;
                let kind = set.typename()?;
                let friends = set.friends(
                    Selection::<String, Character>::new(|set| set.name()).list(),
                )?;
                Ok((name, kind, friends))
            });
            set.characters(entry.list())
        });
    assert_eq!(
        roster.render(),
        "{ characters { name __typename friends { name } } }"
    );

    let data = json!({
        "characters": [
            {"name": "Leia Organa", "__typename": "Human", "friends": [{"name": "Luke Skywalker"}]},
            {"name": "R2-D2", "__typename": "Droid", "friends": []},
        ]
    });
    let decoded = roster.decode(&data).unwrap();
    assert_eq!(decoded[0].1, CharacterTypename::Human);
    assert_eq!(decoded[0].2, vec!["Luke Skywalker".to_string()]);
    assert_eq!(decoded[1].0, "R2-D2");
    assert_eq!(decoded[1].1.typename(), "Droid");
}

#[test]
fn interface_merged_holder_decodes_resolved_type() {
    let roster: Selection<Vec<Character>, Query> =
        Selection::new(|set| set.characters(Character::selection().list()));
    let data = json!({
        "characters": [{
            "__typename": "Droid",
            "id": "2000",
            "name": "C-3PO",
            "appearsIn": ["JEDI"],
            "primaryFunction": "Protocol",
        }]
    });
    let decoded = roster.decode(&data).unwrap();
    assert_eq!(decoded[0].typename, CharacterTypename::Droid);
    assert_eq!(decoded[0].primary_function.as_deref(), Some("Protocol"));
    assert_eq!(decoded[0].home_planet, None);

    let err = roster
        .decode(&json!({"characters": [{"__typename": "Droid", "id": "2000", "name": "C-3PO"}]}))
        .unwrap_err();
    assert_eq!(err.path(), vec!["characters", "0", "appearsIn"]);
}

#[test]
fn discriminator_round_trips_names() {
    for kind in [CharacterTypename::Human, CharacterTypename::Droid] {
        assert_eq!(CharacterTypename::from_typename(kind.typename()), Some(kind));
    }
    assert_eq!(CharacterTypename::from_typename("Wookiee"), None);
    assert_eq!(<CharacterTypename as Discriminator>::TYPE_NAME, "Character");
}
