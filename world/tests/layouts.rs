use maze_chase_core::{CellCoord, Command, Maze};
use maze_chase_world::{self as world, query, GameConfig, GridMaze, LayoutKind, World};

const SIMPLE_ROWS: [&str; 31] = [
    "############################",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "############################",
];

const DECORATIVE_ROWS: [&str; 31] = [
    "############################",
    "#..........................#",
    "#..........................#",
    "#.####.#..#.####.####...#..#",
    "#.#....#..#.#..#.#..#...#..#",
    "#.#....#..#.#..#.#..#...#..#",
    "#.####.#..#.#.##.#.##...#..#",
    "#....#.#..#.#..#.#..#.#.#..#",
    "#....#.#..#.#..#.#..#.#.#..#",
    "#.####.####.#..#.#..#.###..#",
    "#..........................#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........######..........#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#...####################...#",
    "#............##............#",
    "#............##............#",
    "#............##............#",
    "#............##............#",
    "#.#######....##....#######.#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "#..........................#",
    "############################",
];

fn world_on(layout: LayoutKind) -> World {
    let config = GameConfig {
        layout,
        ..GameConfig::default()
    };
    World::new(config.validate().expect("valid config"))
}

#[test]
fn every_coordinate_outside_the_bounds_is_a_wall() {
    for layout in [LayoutKind::Simple, LayoutKind::Decorative] {
        let maze = layout.maze();
        let columns = maze.columns() as i32;
        let rows = maze.rows() as i32;

        for column in -3..columns + 3 {
            for row in [-1000, -2, -1, rows, rows + 1, i32::MAX] {
                assert!(maze.is_wall(CellCoord::new(column, row)), "{column},{row}");
            }
        }
        for row in -3..rows + 3 {
            for column in [i32::MIN, -1, columns, columns + 7] {
                assert!(maze.is_wall(CellCoord::new(column, row)), "{column},{row}");
            }
        }
    }
}

#[test]
fn collectibles_cover_every_open_cell() {
    for layout in [LayoutKind::Simple, LayoutKind::Decorative] {
        let mut world = world_on(layout);
        let mut events = Vec::new();
        world::apply(&mut world, Command::StartNewGame, &mut events);

        let maze = layout.maze();
        let area = (maze.columns() * maze.rows()) as usize;
        let collectibles = query::session(&world).collectibles();

        assert_eq!(collectibles.len(), area - maze.wall_count());
        assert!(collectibles.iter().all(|cell| !maze.is_wall(*cell)));
    }
}

#[test]
fn reference_layouts_share_dimensions() {
    for layout in [LayoutKind::Simple, LayoutKind::Decorative] {
        let maze = layout.maze();
        assert_eq!((maze.columns(), maze.rows()), (28, 31));
    }
}

fn assert_matches_drawing(maze: &GridMaze, drawing: &[&str]) {
    assert_eq!(maze.rows() as usize, drawing.len());
    for (row, line) in drawing.iter().enumerate() {
        assert_eq!(maze.columns() as usize, line.len(), "row {row}");
        for (column, symbol) in line.chars().enumerate() {
            let cell = CellCoord::new(column as i32, row as i32);
            assert_eq!(maze.is_wall(cell), symbol == '#', "cell {column},{row}");
        }
    }
}

#[test]
fn simple_layout_matches_its_drawing_cell_for_cell() {
    assert_matches_drawing(&GridMaze::simple(), &SIMPLE_ROWS);
}

#[test]
fn decorative_layout_matches_its_drawing_cell_for_cell() {
    assert_matches_drawing(&GridMaze::decorative(), &DECORATIVE_ROWS);
    assert_eq!(
        GridMaze::decorative(),
        GridMaze::from_ascii(&DECORATIVE_ROWS).expect("drawing parses")
    );
}
