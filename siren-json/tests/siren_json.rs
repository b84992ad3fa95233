/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use pretty_assertions::assert_eq;
use serde_json::json;
use siren_json::{DeserializeError, PropertyCase, SirenCodec, SirenCodecSettings};
use siren_protocol_test::{
    assert_ok, forbid_members, require_members, validate_json_body, validate_key_order,
};
use siren_types::{
    siren_entity, siren_properties, Action, DynamicEntity, DynamicSubEntity, EmbeddedLink, Entity,
    EntityChild, EntityRegistry, Envelope, Field, HasProperties, InputType, Link, Method,
    SubEntity,
};

#[derive(Debug, Default)]
struct Car {
    envelope: Envelope,
    colour: Option<String>,
    number_of_wheels: i32,
}

siren_properties!(Car { colour, number_of_wheels });
siren_entity!(Car, envelope);

#[derive(Debug, Default)]
struct Wheel {
    envelope: Envelope,
    rel: Vec<String>,
    id: i64,
    size: Option<String>,
}

siren_properties!(Wheel { id, size });
siren_entity!(Wheel, envelope, rel = rel);

fn car() -> Car {
    Car {
        envelope: Envelope::with_class("Car").title("My car"),
        colour: Some("Black".into()),
        number_of_wheels: 5,
    }
}

fn wheel(id: i64) -> Wheel {
    let mut wheel = Wheel {
        envelope: Envelope::with_class("Wheel"),
        rel: vec!["wheel".into()],
        id,
        size: Some("124x55x18".into()),
    };
    wheel
        .envelope
        .links
        .push(Link::self_link(format!("https://api.test.com/wheel/{id}")));
    wheel
}

fn registry() -> EntityRegistry {
    let mut registry = EntityRegistry::new();
    registry
        .register_entity::<Car>("Car")
        .register_sub_entity::<Wheel>("Wheel");
    registry
}

#[test]
fn class_is_the_first_member() {
    let rendered = siren_json::to_string(&car());
    assert!(rendered.starts_with(r#"{"class":["Car"]"#), "{rendered}");
}

#[test]
fn properties_keep_their_json_types() {
    let rendered = siren_json::serialize(&car());
    assert_eq!(
        json!({"colour": "Black", "numberOfWheels": 5}),
        rendered["properties"]
    );
    assert!(rendered["properties"]["numberOfWheels"].is_i64());
}

#[test]
fn action_wire_format() {
    let mut car = car();
    car.envelope.actions.push(Action::new(
        "Inflate",
        "Inflate the wheel",
        Method::Put,
        "https://api.test.com/wheel/inflate",
    ));
    assert_eq!(
        r#"{"name":"Inflate","class":["Inflate"],"method":"PUT","href":"https://api.test.com/wheel/inflate","title":"Inflate the wheel","type":"application/json","fields":[]}"#,
        siren_json::serialize(&car)["actions"][0].to_string()
    );
}

#[test]
fn class_only_document() {
    let car: Car = siren_json::from_str(r#"{"class":["Car"]}"#).expect("valid document");
    assert_eq!(vec!["Car".to_string()], car.envelope.class);
    assert_eq!(None, car.envelope.title);
    assert_eq!(None, car.colour);
    assert_eq!(0, car.number_of_wheels);
    assert!(car.envelope.entities.is_empty());
    assert!(car.envelope.actions.is_empty());
    assert!(car.envelope.links.is_empty());
    assert!(car.envelope.properties.is_empty());
}

#[test]
fn malformed_text_is_reported() {
    let err = siren_json::from_str::<Car>("{not json").expect_err("malformed");
    assert!(matches!(err, DeserializeError::Parse(_)));
    assert!(err.is_parse_error());
}

#[test]
fn wheel_document() {
    let input = r#"
    {
      "class": ["Wheel"],
      "title": "My Car Wheel",
      "properties": {"id": 1, "size": "124x55x18"},
      "entities": [],
      "actions": [
        {
          "name": "Inflate",
          "class": ["Inflate"],
          "method": "PUT",
          "href": "https://api.test.com/wheel/inflate",
          "title": "Inflate the wheel",
          "type": "application/json",
          "fields": [{"name": "pressure", "type": "number", "value": 32}]
        }
      ],
      "links": [{"rel": ["self"], "href": "https://api.test.com/wheel/1"}]
    }"#;
    let wheel: Wheel = siren_json::from_slice(input.as_bytes()).expect("valid document");
    assert_eq!("Wheel", wheel.envelope.class[0]);
    assert_eq!(Some("My Car Wheel"), wheel.envelope.title.as_deref());
    assert_eq!(1, wheel.id);
    assert_eq!(Some("124x55x18"), wheel.size.as_deref());

    let inflate = wheel.envelope.action("Inflate").expect("one action");
    assert_eq!(1, wheel.envelope.actions.len());
    assert_eq!("Inflate", inflate.class[0]);
    assert_eq!(Method::Put, inflate.method);
    assert_eq!("https://api.test.com/wheel/inflate", inflate.href);
    assert_eq!(Some("Inflate the wheel"), inflate.title.as_deref());
    assert_eq!("application/json", inflate.type_);
    assert_eq!(
        vec![Field::new("pressure")
            .input_type(InputType::Number)
            .value(32)],
        inflate.fields
    );
    assert_eq!(
        Some(&Link::self_link("https://api.test.com/wheel/1")),
        wheel.envelope.link("self")
    );
}

#[test]
fn key_order_is_fixed() {
    let mut wheel = wheel(1);
    wheel.envelope.title = Some("Front left".into());
    wheel.envelope.actions.push(Action::new(
        "Inflate",
        "Inflate the wheel",
        Method::Put,
        "https://api.test.com/wheel/inflate",
    ));
    let rendered = SirenCodec::default()
        .serialize_sub_entity(&wheel)
        .to_string();
    let expected = r#"{
        "class": ["Wheel"],
        "title": "Front left",
        "rel": ["wheel"],
        "properties": {"id": 1, "size": "124x55x18"},
        "entities": [],
        "actions": [{
            "name": "Inflate",
            "class": ["Inflate"],
            "method": "PUT",
            "href": "https://api.test.com/wheel/inflate",
            "title": "Inflate the wheel",
            "type": "application/json",
            "fields": []
        }],
        "links": [{"rel": ["self"], "href": "https://api.test.com/wheel/1", "title": null, "type": null}]
    }"#;
    assert_ok(validate_json_body(&rendered, expected));
    assert_ok(validate_key_order(&rendered, expected));
}

#[test]
fn empty_members_are_omitted() {
    let rendered = siren_json::to_string(&Car::default());
    assert_ok(validate_json_body(
        &rendered,
        r#"{"class": [], "properties": {"numberOfWheels": 0}, "entities": []}"#,
    ));
    assert_ok(forbid_members(&rendered, "", &["title", "rel", "actions", "links"]));

    let strict = SirenCodec::new(SirenCodecSettings {
        emit_empty_class: false,
        emit_empty_entities: false,
        ..Default::default()
    });
    let rendered = strict.to_string(&DynamicEntity::default());
    assert_eq!("{}", rendered);
}

#[test]
fn link_nulls_are_written_and_accepted() {
    let mut car = car();
    car.envelope.links.push(
        Link::new("next", "https://api.test.com/car/2")
            .title("Next car")
            .media_type(siren_json::MEDIA_TYPE),
    );
    car.envelope
        .links
        .push(Link::self_link("https://api.test.com/car/1"));
    let rendered = siren_json::to_string(&car);
    assert_ok(require_members(&rendered, "/links/1", &["title", "type"]));

    let parsed: Car = siren_json::from_str(&rendered).expect("valid document");
    assert_eq!(car.envelope.links, parsed.envelope.links);

    let parsed: Car = siren_json::deserialize(json!({
        "links": [{"rel": ["self"], "href": "https://api.test.com/car/1"}]
    }))
    .expect("title and type may be absent");
    assert_eq!(
        vec![Link::self_link("https://api.test.com/car/1")],
        parsed.envelope.links
    );
}

#[test]
fn nested_children_round_trip_through_registry() {
    let mut car = car();
    car.envelope
        .entities
        .push(EntityChild::sub_entity(wheel(1)));
    car.envelope.entities.push(
        EmbeddedLink::new("https://api.test.com/owner/7", "Person", "owner").into(),
    );
    car.envelope
        .entities
        .push(EntityChild::sub_entity(wheel(2)));

    let codec = SirenCodec::default();
    let rendered = codec.serialize(&car);
    assert_ok(forbid_members(
        &rendered.to_string(),
        "/entities/1",
        &["properties", "entities", "actions", "links"],
    ));

    let registry = registry();
    let parsed: Car = codec
        .deserializer(&registry)
        .deserialize(rendered.clone())
        .expect("valid document");
    assert_eq!(3, parsed.envelope.entities.len());

    let wheels: Vec<_> = parsed.envelope.sub_entities().collect();
    assert_eq!(2, wheels.len());
    assert_eq!(&["wheel".to_string()], wheels[0].rel());
    assert_eq!(Some(json!(1)), wheels[0].read_member("id"));
    assert_eq!(Some(json!(2)), wheels[1].read_member("id"));
    assert!(wheels[1].envelope().properties.is_empty());
    assert!(wheels[1].envelope().link("self").is_some());

    let owner = parsed.envelope.entities[1]
        .as_embedded_link()
        .expect("embedded link");
    assert_eq!(
        &EmbeddedLink::new("https://api.test.com/owner/7", "Person", "owner"),
        owner
    );

    assert_eq!(rendered, codec.serialize(&parsed));
}

#[test]
fn grandchildren_round_trip_through_registry() {
    let mut hub = wheel(2);
    hub.envelope.entities.push(
        EmbeddedLink::new("https://api.test.com/tyre/9", "Tyre", "tyre")
            .media_type(siren_json::MEDIA_TYPE)
            .into(),
    );
    let mut axle = wheel(1);
    axle.envelope.entities.push(EntityChild::sub_entity(hub));
    let mut car = car();
    car.envelope.entities.push(EntityChild::sub_entity(axle));

    let codec = SirenCodec::default();
    let rendered = codec.to_string(&car);
    assert_ok(require_members(
        &rendered,
        "/entities/0/entities/0/entities/0",
        &["class", "rel", "href", "type"],
    ));

    let registry = registry();
    let parsed: Car = codec
        .deserializer(&registry)
        .deserialize(serde_json::from_str(&rendered).expect("valid JSON"))
        .expect("valid document");
    let axle = parsed.envelope.sub_entities().next().expect("child");
    let hub = axle.envelope().sub_entities().next().expect("grandchild");
    assert_eq!(Some(json!(2)), hub.read_member("id"));
    let tyre = hub.envelope().embedded_links().next().expect("embedded link");
    assert_eq!("https://api.test.com/tyre/9", tyre.href);

    assert_eq!(rendered, codec.to_string(&parsed));
}

#[test]
fn bare_string_class_resolves_registered_type() {
    let registry = registry();
    let parsed: Car = SirenCodec::default()
        .deserializer(&registry)
        .deserialize(json!({
            "entities": [{"class": "Wheel", "rel": ["wheel"], "properties": {"id": 3}}]
        }))
        .expect("valid document");
    let wheel = parsed.envelope.sub_entities().next().expect("child");
    assert_eq!(&["id", "size"], wheel.member_names());
    assert_eq!(Some(json!(3)), wheel.read_member("id"));
    assert_eq!(&["Wheel".to_string()], &wheel.envelope().class[..]);
    assert!(wheel.envelope().properties.is_empty());
}

#[test]
fn unregistered_sub_entities_keep_their_properties() {
    let parsed: Car = siren_json::deserialize(json!({
        "class": ["Car"],
        "entities": [
            {"class": ["Wheel"], "rel": ["wheel"], "properties": {"id": 3, "size": "205x55x16"}},
            {"class": ["Note"], "href": "https://api.test.com/notes/1", "entities": []}
        ]
    }))
    .expect("valid document");

    let children: Vec<_> = parsed.envelope.sub_entities().collect();
    assert_eq!(2, children.len());
    assert_eq!(&["wheel".to_string()], children[0].rel());
    assert_eq!(
        Some(&json!("205x55x16")),
        children[0].envelope().properties.get("size")
    );
    // Has `entities`, so it is a representation even though it carries `href`.
    assert!(children[1].rel().is_empty());
    assert!(children[1].envelope().has_class("Note"));
}

#[test]
fn tagged_deserialization() {
    let registry = registry();
    let codec = SirenCodec::default();
    let car = codec
        .deserializer(&registry)
        .deserialize_tagged(
            "Car",
            json!({"class": ["Car"], "properties": {"colour": "Red"}}),
        )
        .expect("Car is registered");
    assert_eq!(Some(json!("Red")), car.read_member("colour"));
    assert!(car.envelope().has_class("Car"));

    let err = codec
        .deserializer(&registry)
        .deserialize_tagged("Boat", json!({}))
        .expect_err("Boat is not registered");
    assert!(err.is_unsupported_type());
}

#[test]
fn sub_entity_standalone() {
    let rendered = siren_json::serialize_sub_entity(&wheel(4));
    assert_eq!(json!(["wheel"]), rendered["rel"]);

    let parsed: Wheel = siren_json::deserialize_sub_entity(rendered).expect("valid document");
    assert_eq!(vec!["wheel".to_string()], parsed.rel);
    assert_eq!(4, parsed.id);

    let parsed: Wheel =
        siren_json::deserialize_sub_entity(json!({"class": ["Wheel"]})).expect("rel is optional");
    assert!(parsed.rel.is_empty());
}

#[test]
fn dynamic_entities_collect_every_property() {
    let input = json!({
        "class": ["Order"],
        "properties": {"orderNumber": 42, "itemCount": 3, "status": "pending", "class": "x"}
    });
    let order: DynamicEntity = siren_json::deserialize(input).expect("valid document");
    assert_eq!(3, order.envelope.properties.len());
    assert_eq!(
        r#"{"class":["Order"],"properties":{"orderNumber":42,"itemCount":3,"status":"pending"},"entities":[]}"#,
        siren_json::to_string(&order)
    );
}

#[test]
fn preserve_case_round_trip() {
    let codec = SirenCodec::new(SirenCodecSettings {
        property_case: PropertyCase::Preserve,
        ..Default::default()
    });
    let rendered = codec.serialize(&car());
    assert_eq!(
        json!({"colour": "Black", "number_of_wheels": 5}),
        rendered["properties"]
    );
    let parsed: Car = codec.deserialize(rendered).expect("valid document");
    assert_eq!(5, parsed.number_of_wheels);
}

#[test]
fn writer_and_reader() {
    let mut car = car();
    car.envelope.actions.push(
        Action::new("Search", "Find cars", Method::Get, "https://api.test.com/cars")
            .media_type("application/x-www-form-urlencoded")
            .field(Field::new("q").input_type(InputType::Search).title("Query")),
    );
    let mut buffer = Vec::new();
    siren_json::to_writer(&mut buffer, &car).expect("writing to a Vec cannot fail");
    assert_eq!(siren_json::to_vec(&car), buffer);

    let parsed: Car = siren_json::from_reader(buffer.as_slice()).expect("valid document");
    assert_eq!(car.envelope.actions, parsed.envelope.actions);
    assert_eq!(car.colour, parsed.colour);
}

#[test]
fn structural_errors_abort() {
    let cases = [
        (json!({"entities": {}}), "expected an array at `$.entities`"),
        (json!({"entities": [1]}), "expected a JSON object at `$.entities[0]`"),
        (
            json!({"actions": [{"name": "Inflate"}]}),
            "missing required member `href` at `$.actions[0]`",
        ),
        (
            json!({"links": [{"href": "https://api.test.com"}]}),
            "missing required member `rel` at `$.links[0]`",
        ),
        (
            json!({"entities": [{"class": ["Person"], "href": "https://api.test.com/p/1"}]}),
            "missing required member `rel` at `$.entities[0]`",
        ),
        (
            json!({"actions": [{"name": "Go", "href": "/", "fields": [{"name": "x", "type": "slider"}]}]}),
            "invalid value at `$.actions[0].fields[0].type`",
        ),
    ];
    for (input, message) in cases {
        let err = siren_json::deserialize::<DynamicEntity>(input).expect_err(message);
        assert!(err.is_parse_error());
        assert_eq!(message, err.to_string());
    }
}

#[test]
fn dynamic_sub_entity_builder() {
    let mut sub_entity = DynamicSubEntity::default();
    sub_entity.rel_mut().push("item".into());
    sub_entity
        .envelope
        .properties
        .insert("sku".into(), json!("A-1"));
    let rendered = siren_json::serialize_sub_entity(&sub_entity);
    assert_eq!(
        r#"{"class":[],"rel":["item"],"properties":{"sku":"A-1"},"entities":[]}"#,
        rendered.to_string()
    );
}
