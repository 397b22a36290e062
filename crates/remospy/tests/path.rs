//! Object paths derived from captured ancestry.

use pretty_assertions::assert_eq;
use remospy::{DETACHED_SUFFIX, HierarchyResolver, InstanceRef, InstanceRole, PathResolver, instance_path};

fn service(class_name: &str) -> InstanceRef {
    InstanceRef::new(format!("svc-{class_name}"), class_name, class_name)
        .with_role(InstanceRole::Service)
        .child_of(InstanceRef::game())
}

#[test]
fn roots() {
    assert_eq!(instance_path(&InstanceRef::game()), "game");
    let workspace = InstanceRef::new("ws", "Workspace", "Workspace")
        .with_role(InstanceRole::Workspace)
        .child_of(InstanceRef::game());
    assert_eq!(instance_path(&workspace), "workspace");
}

#[test]
fn services_and_local_player() {
    let remote = InstanceRef::new("r", "Remote", "RemoteEvent").child_of(service("ReplicatedStorage"));
    assert_eq!(instance_path(&remote), "game:GetService(\"ReplicatedStorage\").Remote");

    let player = InstanceRef::new("p", "builderman", "Player")
        .with_role(InstanceRole::LocalPlayer)
        .child_of(service("Players"));
    let backpack = InstanceRef::new("b", "Backpack", "Backpack").child_of(player);
    assert_eq!(instance_path(&backpack), "game:GetService(\"Players\").LocalPlayer.Backpack");
}

#[test]
fn awkward_names() {
    let folder = || InstanceRef::new("f", "Folder", "Folder").child_of(InstanceRef::game());
    let child = |name: &str| InstanceRef::new("c", name, "Part").child_of(folder());

    assert_eq!(instance_path(&child("")), "game.Folder['']");
    assert_eq!(instance_path(&child("1st")), "game.Folder[\"1st\"]");
    assert_eq!(instance_path(&child("Main Menu")), "game.Folder[\"Main Menu\"]");
    assert_eq!(instance_path(&child("a.b")), "game.Folder[\"a.b\"]");
    assert_eq!(instance_path(&child("function")), "game.Folder[\"function\"]");
    assert_eq!(instance_path(&child("back\\slash")), "game.Folder[\"back\\\\slash\"]");
    assert_eq!(instance_path(&child("日本")), "game.Folder[utf8.char(26085, 26412)]");
}

#[test]
fn detached_objects() {
    let orphan = InstanceRef::new("o", "Gun", "Tool");
    assert_eq!(instance_path(&orphan), format!(".Gun{DETACHED_SUFFIX}"));

    let inside_orphan = InstanceRef::new("h", "Handle", "Part").child_of(orphan);
    assert_eq!(
        instance_path(&inside_orphan),
        ".Gun --[[ PARENTED TO NIL OR DESTROYED ]].Handle"
    );
}

#[test]
fn closures_are_resolvers() {
    let resolver = |instance: &InstanceRef| format!("find({})", instance.debug_id);
    assert_eq!(resolver.resolve_path(&InstanceRef::new("7", "X", "Part")), "find(7)");
    assert_eq!(HierarchyResolver.resolve_path(&InstanceRef::game()), "game");
}
