use svg::node::element as svg_element;

use pipeviz_core::{
    apply_stroke,
    draw::{Drawable, LayeredOutput, RenderLayer, StrokeDefinition, Text, TextDefinition},
    geometry::{Point, Size},
};

use crate::model::Region;

/// Translucent background area with its caption in the top-left corner.
#[derive(Debug)]
pub struct RegionBox<'a> {
    region: &'a Region,
    caption: TextDefinition,
}

impl<'a> RegionBox<'a> {
    pub fn new(region: &'a Region) -> Self {
        let mut caption = TextDefinition::new();
        caption.set_font_size(11);
        caption.set_font_weight(Some(700));
        caption.set_color(Some(region.color()));

        Self { region, caption }
    }
}

impl Drawable for RegionBox<'_> {
    fn render_to_layers(&self, position: Point) -> LayeredOutput {
        let mut output = LayeredOutput::new();
        let size = self.size();
        let color = self.region.color();

        let mut stroke = StrokeDefinition::solid(color.with_alpha(0.4), 2.0);
        if self.region.is_dashed() {
            stroke = StrokeDefinition::dashed(color.with_alpha(0.4), 2.0);
        }

        let rect = svg_element::Rectangle::new()
            .set("x", position.x())
            .set("y", position.y())
            .set("width", size.width())
            .set("height", size.height())
            .set("rx", 20)
            .set("fill", color.to_string())
            .set("fill-opacity", 0.08)
            .set("data-region", self.region.label());
        output.add_to_layer(RenderLayer::Region, Box::new(apply_stroke!(rect, &stroke)));

        let label = self.region.label();
        let caption = Text::new(&self.caption, label).with_layer(RenderLayer::Region);
        output.merge(caption.render_to_layers(position.add_point(Point::new(12.0, 8.0))));

        output
    }

    fn size(&self) -> Size {
        self.region.bounds().to_size()
    }
}
