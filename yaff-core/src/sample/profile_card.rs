//! A child component: greets a name received from its parent, counts an age
//! of its own, and renders whatever markup its parent passes in `slot`.

use super::text_of;
use crate::component::{patch, Binding, Component, ComponentCore, Context, ElementId, IdScope, Props};
use crate::error::ComponentError;
use crate::reactive::ReactiveValue;
use crate::surface::escape_text;

/// Identifiers of the elements a [`ProfileCard`] patches or listens on.
#[derive(Debug, Clone)]
pub struct ProfileCardIds {
    pub greeting: ElementId,
    pub age: ElementId,
    pub change_name: ElementId,
    pub change_age: ElementId,
    pub change_both: ElementId,
}

impl ProfileCardIds {
    pub fn new(scope: &IdScope) -> Self {
        let div1 = scope.child("div1");
        Self {
            greeting: div1.id("font1"),
            age: div1.id("font2"),
            change_name: scope.id("b1"),
            change_age: scope.id("b2"),
            change_both: scope.id("b3"),
        }
    }
}

pub struct ProfileCard {
    core: ComponentCore,
    ids: ProfileCardIds,
    name: ReactiveValue<String>,
    age: ReactiveValue<i64>,
}

impl ProfileCard {
    pub const NAME: &'static str = "ProfileCard";

    pub fn ids(&self) -> &ProfileCardIds {
        &self.ids
    }

    /// The `name` prop, composed with this card's greeting patch.
    pub fn name_state(&self) -> &ReactiveValue<String> {
        &self.name
    }

    pub fn age_state(&self) -> &ReactiveValue<i64> {
        &self.age
    }
}

impl Component for ProfileCard {
    fn construct(cx: &Context, props: Props) -> Result<Self, ComponentError> {
        let scope = cx.scope_for(Self::NAME);
        let ids = ProfileCardIds::new(&scope);

        let name = props.require::<String>(Self::NAME, "name")?.chain(patch::reaction(
            cx,
            vec![Binding::text(ids.greeting.clone(), |name: &String| {
                format!("Hello, {name}!")
            })],
        ));
        let age = ReactiveValue::new(
            0_i64,
            patch::reaction(
                cx,
                vec![Binding::text(ids.age.clone(), |age: &i64| format!("Age: {age}"))],
            ),
        );
        let slot = props.optional::<String>(Self::NAME, "slot")?;

        let markup = format!(
            r#"
            <style>
                font.{class} {{
                    color: red;
                }}
            </style>
            <font class="{class}" id="{greeting}">Hello, {name}!</font><br/>
            <font class="{class}" id="{age_id}">Age: {age}</font><br/>
            {slot}<br/>
            <button id="{b1}">Change Name</button>
            <button id="{b2}">Change Age</button>
            <button id="{b3}">Change Both</button>
            "#,
            class = Self::NAME,
            greeting = ids.greeting,
            name = escape_text(&text_of(&name)),
            age_id = ids.age,
            age = text_of(&age),
            slot = slot.get().unwrap_or_default(),
            b1 = ids.change_name,
            b2 = ids.change_age,
            b3 = ids.change_both,
        );

        let mut core = ComponentCore::new(Self::NAME, cx, props);
        core.render(&markup)?;

        Ok(Self { core, ids, name, age })
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }

    fn wire(&mut self) {
        let name = self.name.clone();
        self.core.listen(&self.ids.change_name, "click", move || {
            name.update("Alice".to_string());
        });

        let age = self.age.clone();
        self.core.listen(&self.ids.change_age, "click", move || {
            age.update_with(|age| age + 1);
        });

        let (name, age) = (self.name.clone(), self.age.clone());
        self.core.listen(&self.ids.change_both, "click", move || {
            name.update("Alice".to_string());
            age.update_with(|age| age + 1);
        });
    }
}

impl std::fmt::Debug for ProfileCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfileCard")
            .field("core", &self.core)
            .field("name", &self.name)
            .field("age", &self.age)
            .finish()
    }
}
