//! A parent component: owns a `name` state, greets it, and embeds a
//! [`ProfileCard`] that receives `name` as a prop plus three nodes of its
//! own markup bound to the same state.

use super::profile_card::{ProfileCard, ProfileCardIds};
use super::text_of;
use crate::component::{patch, Binding, Component, ComponentCore, Context, ElementId, Props};
use crate::error::ComponentError;
use crate::reactive::ReactiveValue;
use crate::surface::escape_text;

/// Identifiers of the elements a [`GreetingPanel`] patches.
#[derive(Debug, Clone)]
pub struct GreetingPanelIds {
    pub greeting: ElementId,
    /// Parent-bound nodes rendered inside the card's slot.
    pub slot: [ElementId; 3],
    pub card: ProfileCardIds,
}

pub struct GreetingPanel {
    core: ComponentCore,
    ids: GreetingPanelIds,
    name: ReactiveValue<String>,
}

impl GreetingPanel {
    pub const NAME: &'static str = "GreetingPanel";

    pub fn ids(&self) -> &GreetingPanelIds {
        &self.ids
    }

    pub fn name_state(&self) -> &ReactiveValue<String> {
        &self.name
    }
}

impl Component for GreetingPanel {
    fn construct(cx: &Context, props: Props) -> Result<Self, ComponentError> {
        let scope = cx.scope_for(Self::NAME);
        let div2 = scope.child("div1").child("div2");
        let card_scope = div2.child("ProfileCard1");

        let greeting = div2.id("font1");
        let slot = [card_scope.id("font1"), card_scope.id("font2"), card_scope.id("font3")];

        let mut bindings = vec![Binding::text(greeting.clone(), |name: &String| {
            format!("Hello, {name}!")
        })];
        bindings.extend(slot.iter().map(|id| {
            Binding::text(id.clone(), |name: &String| format!("Child test: {name}"))
        }));
        let name = ReactiveValue::new("World".to_string(), patch::reaction(cx, bindings));

        let current = escape_text(&text_of(&name));
        let slot_markup: String = slot
            .iter()
            .enumerate()
            .map(|(i, id)| {
                let br = if i + 1 < slot.len() { "<br/>" } else { "" };
                format!(r#"<font class="{}" id="{id}">Child test: {current}</font>{br}"#, Self::NAME)
            })
            .collect();

        let card = ProfileCard::construct(
            &cx.embedded(card_scope),
            Props::new()
                .with("name", name.clone())
                .with("slot", ReactiveValue::with_value(slot_markup)),
        )?;
        let card_ids = card.ids().clone();
        let card_markup = card.markup();

        let mut core = ComponentCore::new(Self::NAME, cx, props);
        core.add_child(Box::new(card));

        let markup = format!(
            r#"
            <div class="{class}">
                <div>
                    <font id="{greeting}">Hello, {current}!</font><br/>
                    {card_markup}
                </div>
            </div>
            "#,
            class = Self::NAME,
        );
        core.render(&markup)?;

        Ok(Self {
            core,
            ids: GreetingPanelIds {
                greeting,
                slot,
                card: card_ids,
            },
            name,
        })
    }

    fn core(&self) -> &ComponentCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ComponentCore {
        &mut self.core
    }
}

impl std::fmt::Debug for GreetingPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreetingPanel")
            .field("core", &self.core)
            .field("name", &self.name)
            .finish()
    }
}
