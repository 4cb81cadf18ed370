//! Style aggregation.
//!
//! Resolves every CSS property a node can carry and folds the results into
//! one map, then applies the style-level rules: defaults for unbound layout
//! properties, `url(...)` wrapping of background images, and preset
//! replacement.

use atelier_model::UiEntity;
use atelier_store::{EngineConfig, Memo, MemoStats, StyleConfig, Store};
use atelier_types::EntityId;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::normalized::{ContentType, NormalizedBinding};
use crate::resolver::{ResolveContext, Resolver};

/// Every style property the aggregator resolves.
pub const STYLE_PROPERTIES: &[&str] = &[
    // display and flex layout
    "display",
    "flexDirection",
    "flexWrap",
    "justifyContent",
    "alignItems",
    "alignSelf",
    "gap",
    "flexGrow",
    "flexShrink",
    "flexBasis",
    // sizing
    "width",
    "height",
    "minWidth",
    "maxWidth",
    "minHeight",
    "maxHeight",
    "overflow",
    // spacing
    "padding",
    "paddingTop",
    "paddingRight",
    "paddingBottom",
    "paddingLeft",
    "margin",
    "marginTop",
    "marginRight",
    "marginBottom",
    "marginLeft",
    // typography
    "color",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "fontStyle",
    "lineHeight",
    "letterSpacing",
    "textAlign",
    "textDecoration",
    "textTransform",
    // background, border, shadow
    "backgroundColor",
    "backgroundImage",
    "backgroundSize",
    "backgroundPosition",
    "borderWidth",
    "borderStyle",
    "borderColor",
    "borderRadius",
    "boxShadow",
    "opacity",
    // position and transform
    "position",
    "top",
    "right",
    "bottom",
    "left",
    "zIndex",
    "transform",
];

/// The aggregated style map of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputedStyles {
    pub styles: Map<String, Value>,
    pub is_flex_direction_column: bool,
    pub is_align_items_stretch: bool,
}

impl ComputedStyles {
    fn from_styles(styles: Map<String, Value>) -> Self {
        let is = |key: &str, expected: &str| styles.get(key).and_then(Value::as_str) == Some(expected);
        Self {
            is_flex_direction_column: is("flexDirection", "column"),
            is_align_items_stretch: is("alignItems", "stretch"),
            styles,
        }
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&Value> {
        self.styles.get(property)
    }
}

/// Resolved content of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Folds resolved style properties into a [`ComputedStyles`].
#[derive(Debug, Clone)]
pub struct StyleAggregator<'s> {
    resolver: Resolver<'s>,
    config: StyleConfig,
}

impl<'s> StyleAggregator<'s> {
    #[must_use]
    pub fn new(store: &'s Store) -> Self {
        Self::with_config(store, &EngineConfig::default())
    }

    #[must_use]
    pub fn with_config(store: &'s Store, config: &EngineConfig) -> Self {
        Self {
            resolver: Resolver::new(store),
            config: config.styles.clone(),
        }
    }

    #[must_use]
    pub fn resolver(&self) -> &Resolver<'s> {
        &self.resolver
    }

    /// Resolves every style property of `ui_id`.
    ///
    /// Unresolvable properties are left out. A non-empty preset value
    /// replaces the whole map.
    #[must_use]
    pub fn compute_styles(&self, ui_id: &str, ctx: &ResolveContext<'_>) -> ComputedStyles {
        if let Some(preset) = self.preset_value(ui_id, ctx) {
            debug!(ui_id, keys = preset.len(), "preset replaces computed styles");
            return ComputedStyles::from_styles(preset);
        }

        let mut styles = Map::new();
        for property in STYLE_PROPERTIES {
            match self.resolver.resolve(ui_id, &format!("style.{property}"), ctx) {
                Some(Value::Null) | None => {}
                Some(value) => {
                    styles.insert((*property).to_owned(), value);
                }
            }
        }

        if self.config.wrap_background_image {
            if let Some(Value::String(image)) = styles.get_mut("backgroundImage") {
                if !image.is_empty() && !image.starts_with("url(") {
                    *image = format!("url({image})");
                }
            }
        }
        if styles.get("display").and_then(Value::as_str) == Some("flex")
            && !styles.contains_key("flexDirection")
        {
            styles.insert(
                "flexDirection".to_owned(),
                Value::String(self.config.default_flex_direction.clone()),
            );
        }
        if !styles.contains_key("position") {
            styles.insert(
                "position".to_owned(),
                Value::String(self.config.default_position.clone()),
            );
        }

        trace!(ui_id, count = styles.len(), "computed styles");
        ComputedStyles::from_styles(styles)
    }

    fn preset_value(&self, ui_id: &str, ctx: &ResolveContext<'_>) -> Option<Map<String, Value>> {
        match self.resolver.resolve(ui_id, "bindings.PRESET_MODE_VALUE", ctx)? {
            Value::Object(preset) if !preset.is_empty() => Some(preset),
            _ => None,
        }
    }

    /// Resolves the content of `ui_id` into text or an image source.
    ///
    /// Bound values land in `src` on `img` elements and in `text` elsewhere;
    /// `value` always carries the raw resolved value.
    #[must_use]
    pub fn compute_content(&self, ui_id: &str, ctx: &ResolveContext<'_>) -> ContentDescriptor {
        let Some(normalized) = self.resolver.resolve_normalized(ui_id, "content") else {
            return ContentDescriptor::default();
        };

        if let NormalizedBinding::Literal {
            value,
            content_type: Some(content_type),
        } = &normalized
        {
            let s = value.as_str().map(str::to_owned);
            return match content_type {
                ContentType::Text => ContentDescriptor {
                    src: None,
                    text: s,
                    value: Some(value.clone()),
                },
                ContentType::Image => ContentDescriptor {
                    src: s,
                    text: None,
                    value: Some(value.clone()),
                },
            };
        }

        let Some(value) = self.resolver.resolve_prepared(&normalized, ctx) else {
            return ContentDescriptor::default();
        };
        let is_image = matches!(
            self.resolver.store().ui_entity_by_id(ui_id),
            Some(UiEntity::Element(element)) if element.tag == "img"
        );
        let rendered = match &value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        };
        if is_image {
            ContentDescriptor {
                src: rendered,
                text: None,
                value: Some(value),
            }
        } else {
            ContentDescriptor {
                src: None,
                text: rendered,
                value: Some(value),
            }
        }
    }
}

/// Memoized [`StyleAggregator::compute_styles`].
///
/// One slot per `(ui_id, instance id)`, keyed on [`Store::revision`].
/// Contexts that carry a data record are computed fresh every time. When
/// the store changes, slots whose node or instance was removed are dropped.
#[derive(Debug, Default)]
pub struct StyleSelector {
    config: EngineConfig,
    memos: HashMap<(EntityId, Option<EntityId>), Memo<u64, ComputedStyles>>,
    pruned_at: Option<u64>,
}

impl StyleSelector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            memos: HashMap::new(),
            pruned_at: None,
        }
    }

    pub fn select(
        &mut self,
        store: &Store,
        ui_id: &str,
        ctx: &ResolveContext<'_>,
    ) -> Arc<ComputedStyles> {
        let aggregator = StyleAggregator::with_config(store, &self.config);
        if ctx.current_data_record.is_some() {
            return Arc::new(aggregator.compute_styles(ui_id, ctx));
        }

        self.prune(store);
        let key = (
            EntityId::from(ui_id),
            ctx.current_instance.map(|instance| instance.id.clone()),
        );
        self.memos
            .entry(key)
            .or_default()
            .get_or_compute(store.revision(), || aggregator.compute_styles(ui_id, ctx))
    }

    /// Summed hit/miss counters over every slot.
    #[must_use]
    pub fn stats(&self) -> MemoStats {
        self.memos.values().fold(MemoStats::default(), |acc, memo| {
            let stats = memo.stats();
            MemoStats {
                hits: acc.hits + stats.hits,
                misses: acc.misses + stats.misses,
            }
        })
    }

    /// Number of cached slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.memos.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    fn prune(&mut self, store: &Store) {
        let revision = store.revision();
        if self.pruned_at == Some(revision) {
            return;
        }
        let before = self.memos.len();
        self.memos.retain(|(ui_id, instance_id), _| {
            store.ui_entity_by_id(ui_id.as_str()).is_some()
                && instance_id
                    .as_ref()
                    .is_none_or(|id| store.instance_by_id(id.as_str()).is_some())
        });
        if self.memos.len() < before {
            trace!(dropped = before - self.memos.len(), "pruned style slots");
        }
        self.pruned_at = Some(revision);
    }

    /// Drops every cached entry.
    pub fn clear(&mut self) {
        self.memos.clear();
    }
}
