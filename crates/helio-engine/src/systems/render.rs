use crate::components::entity::Entity;
use crate::renderer::instance::{BodyInstance, RenderBuffer, FLAG_HALO, FLAG_RING};

/// Build body instances from a set of entities, in iteration order.
/// Points are left to `Game::render`.
pub fn build_render_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut RenderBuffer) {
    buffer.clear();

    for entity in entities {
        if !entity.active {
            continue;
        }
        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let mut flags = 0;
        if mesh.halo {
            flags |= FLAG_HALO;
        }
        let (ring_inner, ring_outer) = match mesh.ring {
            Some(ring) => {
                flags |= FLAG_RING;
                (ring.inner, ring.outer)
            }
            None => (0.0, 0.0),
        };

        buffer.push(BodyInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            radius: mesh.radius,
            rotation: entity.rotation,
            r: mesh.color.r,
            g: mesh.color.g,
            b: mesh.color.b,
            emissive: mesh.emissive,
            flags: flags as f32,
            ring_inner,
            ring_outer,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{Rgb, RingMesh, SphereMesh};
    use glam::Vec3;

    #[test]
    fn meshes_become_instances() {
        let ring = RingMesh { inner: 4.0, outer: 8.0 };
        let entities = vec![
            Entity::new(EntityId(1))
                .with_pos(Vec3::new(1.0, 2.0, 3.0))
                .with_mesh(SphereMesh::new(6.0, Rgb::WHITE).with_emissive(1.0)),
            Entity::new(EntityId(2)).with_mesh(SphereMesh::new(3.2, Rgb::WHITE).with_ring(ring)),
            Entity::new(EntityId(3)),
        ];

        let mut buffer = RenderBuffer::default();
        build_render_buffer(entities.iter(), &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.instances[0].z, 3.0);
        assert_eq!(buffer.instances[0].emissive, 1.0);
        assert!(buffer.instances[1].has_flag(FLAG_RING));
        assert_eq!(buffer.instances[1].ring_outer, 8.0);
    }

    #[test]
    fn inactive_entities_are_skipped() {
        let mut entity = Entity::new(EntityId(1)).with_mesh(SphereMesh::default());
        entity.active = false;

        let entities = vec![entity];
        let mut buffer = RenderBuffer::default();
        build_render_buffer(entities.iter(), &mut buffer);
        assert_eq!(buffer.instance_count(), 0);
    }
}
